use std::path::PathBuf;

use log::info;

use crate::app::App;
use crate::config;
use crate::library::expand_paths;

/// Import whatever was named on the command line before the window opens.
///
/// Directories contribute their audio files; plain files are taken as given.
pub fn import_initial_paths(app: &mut App, args: &[PathBuf], settings: &config::Settings) {
    if args.is_empty() {
        return;
    }

    let paths = expand_paths(args, &settings.library);
    info!(
        "importing {} file(s) from {} command-line path(s)",
        paths.len(),
        args.len()
    );
    app.import_paths(paths);
}
