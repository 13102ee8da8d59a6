//! Directory tree rendering for the `dir-tree` command.
//!
//! ```text
//! ├── docs
//! │   └── notes.txt
//! └── main.txt
//! ```

use std::fs;
use std::io;
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render the contents of `root` as a tree, one entry per line, sorted by name.
///
/// Subdirectories that cannot be read are listed but not descended into.
pub fn render(root: &Path) -> io::Result<String> {
    let mut out = String::new();
    walk(root, "", &mut out)?;
    Ok(out)
}

fn walk(dir: &Path, prefix: &str, out: &mut String) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { LAST_BRANCH } else { BRANCH });
        out.push_str(&entry.file_name().to_string_lossy());
        out.push('\n');

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_prefix = format!("{prefix}{}", if last { SPACE } else { PIPE });
            // unreadable subdirectories are shown as leaves
            let _ = walk(&entry.path(), &child_prefix, out);
        }
    }
    Ok(())
}
