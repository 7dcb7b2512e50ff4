use std::path::Path;
use std::process::Command;

/// Run git in `dir`, returning trimmed stdout on success.
fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(dir).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    Some(text.trim().to_owned())
}

fn main() {
    println!("cargo:rerun-if-env-changed=QUESTLOG_BUILD_SHA");

    // Packagers building from a tarball can pin the id themselves.
    if let Ok(pinned) = std::env::var("QUESTLOG_BUILD_SHA") {
        println!("cargo:rustc-env=QUESTLOG_BUILD_SHA={pinned}");
        return;
    }

    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let workspace = Path::new(&crate_dir).join("..");
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());

    let id = match git(&workspace, &["rev-parse", "--short=10", "HEAD"]).filter(|s| !s.is_empty()) {
        Some(sha) => {
            let dirty = git(&workspace, &["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|s| !s.is_empty());
            if dirty { format!("{sha}-dirty") } else { sha }
        }
        None => "nogit".to_owned(),
    };
    println!("cargo:rustc-env=QUESTLOG_BUILD_SHA={id}");
}
