use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zotfile-doctor")]
#[command(about = "zotfile directory consistency checker", long_about = None)]
pub struct Cli {
    /// path-to-zotero/zotero.sqlite
    pub zotero_sqlite: PathBuf,

    /// zotfile directory
    pub zotfile_directory: PathBuf,

    /// Remove files in zotfile directory but not in DB
    #[arg(short, long)]
    pub clean: bool,

    /// Require a document content type for linked files too
    #[arg(long)]
    pub strict_link_filter: bool,

    /// Hide progress spinners
    #[arg(short, long)]
    pub quiet: bool,
}
