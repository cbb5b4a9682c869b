use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "mazeview_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn grid() -> Grid {
    Grid::closed(4, 5, Coord::new(0, 0), Coord::new(3, 4)).unwrap()
}

#[test]
fn key_names_match_stored_slots() {
    let names: Vec<_> = SessionKey::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        names,
        vec!["last_generated", "solve_session", "gen_prefs", "solve_prefs"]
    );
}

#[test]
fn memory_store_round_trips_grid() {
    let mut store = MemoryStore::new();
    assert!(load_generated(&store).unwrap().is_none());
    save_generated(&mut store, &grid()).unwrap();
    assert_eq!(load_generated(&store).unwrap(), Some(grid()));
    store.remove(SessionKey::LastGenerated).unwrap();
    assert!(store.is_empty());
}

#[test]
fn solve_session_stores_overridden_endpoints() {
    let mut store = MemoryStore::new();
    let ep = Endpoints {
        start: Coord::new(1, 1),
        end: Coord::new(2, 3),
    };
    save_solve_session(&mut store, &grid(), Some(ep)).unwrap();
    let loaded = load_solve_session(&store).unwrap().unwrap();
    assert_eq!(loaded.endpoints(), ep);

    let bad = Endpoints {
        start: Coord::new(0, 0),
        end: Coord::new(9, 9),
    };
    assert!(save_solve_session(&mut store, &grid(), Some(bad)).is_err());
}

#[test]
fn corrupt_stored_grid_is_rejected() {
    let mut store = MemoryStore::new();
    let mut g = grid();
    g.grid.pop();
    store
        .save(SessionKey::LastGenerated, serde_json::to_value(&g).unwrap())
        .unwrap();
    assert!(matches!(
        load_generated(&store),
        Err(MazeViewError::Validation(_))
    ));
}

#[test]
fn solve_prefs_use_camel_case_and_clamp() {
    let prefs: SolvePrefs = serde_json::from_str(
        r#"{"solveType":"astar","startPoint":[0,9],"endPoint":[7,2],"mazeId":"m1"}"#,
    )
    .unwrap();
    assert_eq!(prefs.solve_type, "astar");
    assert_eq!(prefs.maze_id.as_deref(), Some("m1"));
    assert_eq!(
        prefs.endpoints_for(&grid()),
        Some(Endpoints {
            start: Coord::new(0, 4),
            end: Coord::new(3, 2),
        })
    );
    assert_eq!(SolvePrefs::default().endpoints_for(&grid()), None);
}

#[test]
fn json_dir_store_persists_across_instances() {
    let root = temp_dir("json_dir_store");
    let prefs = GenPrefs {
        gen_type: "prim".into(),
        dims: GridDims { rows: 30, cols: 40 },
    };
    {
        let mut store = JsonDirStore::open(&root).unwrap();
        save_typed(&mut store, SessionKey::GenPrefs, &prefs).unwrap();
        assert!(store.path_for(SessionKey::GenPrefs).is_file());
    }
    let mut store = JsonDirStore::open(&root).unwrap();
    assert_eq!(
        load_typed::<GenPrefs>(&store, SessionKey::GenPrefs).unwrap(),
        Some(prefs)
    );
    assert!(store.load(SessionKey::SolvePrefs).unwrap().is_none());
    store.remove(SessionKey::GenPrefs).unwrap();
    store.remove(SessionKey::GenPrefs).unwrap();
    assert!(store.load(SessionKey::GenPrefs).unwrap().is_none());
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn garbage_file_is_a_serde_error() {
    let root = temp_dir("json_dir_garbage");
    let store = JsonDirStore::open(&root).unwrap();
    std::fs::write(store.path_for(SessionKey::SolvePrefs), b"{not json").unwrap();
    assert!(matches!(
        store.load(SessionKey::SolvePrefs),
        Err(MazeViewError::Serde(_))
    ));
    std::fs::remove_dir_all(&root).unwrap();
}
