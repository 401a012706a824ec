//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Upload storage settings.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Directory uploaded images are written to and served from
    #[arg(long, env = "UPLOAD_PATH", default_value = "public/uploads")]
    pub upload_path: PathBuf,

    /// Largest accepted upload in bytes
    #[arg(long, env = "MAX_FILE_SIZE", default_value_t = 5_242_880_u64)]
    pub max_file_size: u64,
}
