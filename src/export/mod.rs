pub mod png;

pub use png::{
    ExportOptions, THUMBNAIL_SIZE, encode_png, export_filename, export_to_dir, render_export,
    save_png, thumbnail,
};
