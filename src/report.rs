use crate::promote::{PromotionRank, PromotionSet};
use directories::UserDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "Promotions.txt";

/// File body: bold tier headers (ready to paste into an announcement),
/// comma-joined display strings, two blank lines after each tier.
pub fn render(promotions: &PromotionSet) -> String {
    let mut out = String::new();
    for rank in PromotionRank::ALL {
        out.push_str("**Rank ");
        out.push_str(rank.label());
        out.push_str(" Promotions:**\n");
        out.push_str(&promotions.names(rank).join(", "));
        out.push_str("\n\n\n");
    }
    out
}

/// Console mirror of the report: plain headers, one name per line.
pub fn print_console(promotions: &PromotionSet) {
    for rank in PromotionRank::ALL {
        println!("Rank {} Promotions:", rank.label());
        for name in promotions.names(rank) {
            println!("{name}");
        }
        println!("---------------------------");
    }
}

/// `Promotions.txt` on the desktop, or the working directory when no
/// desktop folder is known.
pub fn default_output_path() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.desktop_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(REPORT_FILE_NAME)
}

pub fn write_report(path: &Path, promotions: &PromotionSet) -> io::Result<()> {
    fs::write(path, render(promotions))
}
