use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locates the path under which a `vc_*` crate is reachable from the crate
/// currently being compiled.
///
/// Derive output has to name items of the runtime crate, and the caller
/// may depend on it directly, through the `vc_serial` umbrella crate, or
/// under a renamed dependency key.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_serializer"));
/// ```
///
/// Reading the manifest is slow, so call this once per macro invocation
/// and pass the path around.
///
/// # Resolution rules
///
/// 1. `name` listed in `dependencies`: `::name`, or `::key` if the entry is
///    a rename (`key = { package = "name", .. }`).
/// 2. `name` begins with `vc_` and the umbrella `vc_serial` is listed
///    (possibly renamed): `::vc_serial::short_name`, e.g.
///    `vc_serializer` -> `::vc_serial::serializer`.
/// 3. Repeat 1-2 in `dev-dependencies`.
/// 4. Otherwise fall back to `::name`.
///
/// ## Note
///
/// A crate referring to itself from doctests needs
/// `extern crate self as name;` at its root so `::name` resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "vc_serial";
const ENGINE_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    /// Returns the key under which `package` is declared in `deps`.
    ///
    /// Keys are normalised to identifiers (`vc-serial` -> `vc_serial`).
    fn dependency_key(deps: &Table, package: &str) -> Option<String> {
        deps.iter().find_map(|(key, item)| {
            let renamed = item
                .get("package")
                .and_then(Item::as_str)
                .map(|name| name.replace('-', "_"));
            let matches = match renamed {
                Some(name) => name == package,
                None => key.replace('-', "_") == package,
            };
            matches.then(|| key.replace('-', "_"))
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return Some(Self::parse_str(&format!("::{key}")));
        }

        let module = name.strip_prefix(ENGINE_PREFIX)?;
        let key = Self::dependency_key(deps, UMBRELLA_NAME)?;
        let mut path = Self::parse_str::<syn::Path>(&format!("::{key}"));
        path.segments.push(Self::parse_str(module));
        Some(path)
    }

    /// Returns a [`syn::Path`] for the package named `name` as resolved from
    /// the caller's Cargo.toml. See the type docs for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Parsed manifests are cached per path and re-read only when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use quote::ToTokens;
    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_string().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn resolve(text: &str, name: &str) -> String {
        manifest(text)
            .get_crate_path(name)
            .to_token_stream()
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let text = "[dependencies]\nvc_serializer = \"0.0.1\"\n";
        assert_eq!(resolve(text, "vc_serializer"), "::vc_serializer");
    }

    #[test]
    fn through_umbrella() {
        let text = "[dependencies]\nvc_serial = { path = \"..\" }\n";
        assert_eq!(resolve(text, "vc_serializer"), "::vc_serial::serializer");

        let text = "[dev-dependencies]\nserial = { package = \"vc_serial\" }\n";
        assert_eq!(resolve(text, "vc_value"), "::serial::value");
    }

    #[test]
    fn fallback() {
        assert_eq!(resolve("[package]\nname = \"x\"\n", "vc_serializer"), "::vc_serializer");
    }
}
