use super::*;

fn sample_json() -> String {
    r#"{
        "id": "abc123",
        "rows": 2,
        "cols": 2,
        "grid": [
            [
                { "row": 0, "col": 0, "visited": true, "walls": [true, false, false, true], "wall_weights": [3, 0, 0, 1000] },
                { "row": 0, "col": 1, "visited": true, "walls": [true, true, false, false], "wall_weights": [5, 7, 0, 0] }
            ],
            [
                { "walls": [false, false, true, true], "wall_weights": [0, 0, 12, 255] },
                { "walls": [false, true, true, false], "wall_weights": [0, 1, 2, 0] }
            ]
        ],
        "start": [0, 0],
        "end": [1, 1],
        "weights": { "0,0": 4 }
    }"#
    .to_string()
}

#[test]
fn parses_generator_shape_and_ignores_extra_fields() {
    let g = Grid::from_json_str(&sample_json()).unwrap();
    assert_eq!(g.id.as_deref(), Some("abc123"));
    assert_eq!((g.rows, g.cols), (2, 2));
    assert_eq!(g.start, Coord::new(0, 0));
    assert_eq!(g.end, Coord::new(1, 1));
    let c = g.cell(Coord::new(0, 0)).unwrap();
    assert!(c.has_wall(Wall::North));
    assert!(!c.has_wall(Wall::East));
    assert_eq!(c.weight(Wall::West), 1000);
}

#[test]
fn rejects_wall_slots_not_exactly_four() {
    let bad = sample_json().replace("[true, false, false, true]", "[true, false, false]");
    let err = Grid::from_json_str(&bad).unwrap_err();
    assert!(matches!(err, MazeViewError::Serde(_)));
}

#[test]
fn rejects_ragged_rows() {
    let mut g = Grid::closed(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
    g.grid[1].pop();
    let err = g.validate().unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn rejects_row_count_mismatch_and_zero_dims() {
    let mut g = Grid::closed(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
    g.rows = 4;
    assert!(g.validate().is_err());

    assert!(Grid::closed(0, 3, Coord::new(0, 0), Coord::new(0, 0)).is_err());
}

#[test]
fn rejects_out_of_range_endpoints() {
    let err = Grid::closed(3, 3, Coord::new(0, 0), Coord::new(3, 0)).unwrap_err();
    assert!(err.to_string().contains("end"));
}

#[test]
fn endpoint_overrides_do_not_mutate_grid() {
    let g = Grid::closed(4, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
    let ep = Endpoints {
        start: Coord::new(1, 1),
        end: Coord::new(2, 0),
    };
    assert_eq!(g.endpoints_with(Some(ep)).unwrap(), ep);
    assert_eq!(g.endpoints_with(None).unwrap(), g.endpoints());
    assert_eq!(g.start, Coord::new(0, 0));

    let bad = Endpoints {
        start: Coord::new(0, 9),
        end: Coord::new(0, 0),
    };
    assert!(g.endpoints_with(Some(bad)).is_err());
}

#[test]
fn with_endpoints_stores_override_in_copy() {
    let g = Grid::closed(4, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
    let moved = g
        .with_endpoints(Endpoints {
            start: Coord::new(0, 3),
            end: Coord::new(3, 0),
        })
        .unwrap();
    assert_eq!(moved.start, Coord::new(0, 3));
    assert_eq!(moved.end, Coord::new(3, 0));
    assert_eq!(g.start, Coord::new(0, 0));
}

#[test]
fn present_walls_follow_storage_order() {
    let cell = Cell {
        walls: [false, true, false, true],
        wall_weights: [9, 8, 7, 6],
    };
    let got: Vec<_> = cell.present_walls().collect();
    assert_eq!(got, vec![(Wall::East, 8), (Wall::West, 6)]);
}

#[test]
fn check_coords_reports_first_offender() {
    let g = Grid::closed(2, 2, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
    assert!(g.check_coords("visited", &[Coord::new(0, 1)]).is_ok());
    let err = g
        .check_coords("path", &[Coord::new(0, 1), Coord::new(2, 0)])
        .unwrap_err();
    assert!(matches!(err, MazeViewError::Animation(_)));
    assert!(err.to_string().contains("path[1]"));
}
