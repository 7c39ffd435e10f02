use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read};
use std::sync::Arc;

use icp_library::LibraryRegistry;
use icp_types::LibraryReference;
use tracing::{debug, info};

use crate::error::PackageResult;
use crate::manifest::{BundledLibrary, PackageManifest, CONTENT_PATH, LIBRARY_DESCRIPTOR, MANIFEST_PATH};
use crate::policy::PackagePolicy;
use crate::staging::{StagingArea, StagingRef};

/// Everything learned from validating one package.
#[derive(Clone, Debug, Default)]
pub struct PackageReport {
    /// Problems that make the package unacceptable.
    pub errors: Vec<String>,
    /// Informational notes, shown alongside errors.
    pub info: Vec<String>,
    /// The parsed manifest, when it was present and well-formed.
    pub manifest: Option<PackageManifest>,
    /// Where the package was staged. Only set when `errors` is empty.
    pub staging: Option<StagingRef>,
}

impl PackageReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors followed by informational notes.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().chain(self.info.iter()).map(String::as_str)
    }
}

/// A well-known file looked for during the scan.
#[derive(Default)]
enum Slot {
    #[default]
    Absent,
    /// Present but not read; the reason is already in the errors.
    Unread,
    Read(Vec<u8>),
}

/// Files pulled out of the archive during the scan.
#[derive(Default)]
struct Scan {
    manifest: Slot,
    content: Slot,
    /// Library folder name → its `library.json`.
    libraries: BTreeMap<String, Slot>,
    declared_bytes: u64,
    /// Bytes actually decompressed so far.
    read_bytes: u64,
    ignored_top_level: usize,
}

/// Structural and security validation of uploaded content packages.
pub struct PackageValidator {
    registry: Arc<dyn LibraryRegistry>,
    staging: StagingArea,
}

impl PackageValidator {
    pub fn new(registry: Arc<dyn LibraryRegistry>, staging: StagingArea) -> Self {
        Self { registry, staging }
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Validate a package and, if it is acceptable, stage it.
    ///
    /// Every problem found is collected into the report; a readable archive
    /// is always checked completely. Returns `Err` only when staging fails or
    /// the registry cannot be queried.
    pub fn validate(&self, bytes: &[u8], policy: &PackagePolicy) -> PackageResult<PackageReport> {
        let mut report = PackageReport::default();

        let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
            Ok(archive) => archive,
            Err(e) => {
                report
                    .errors
                    .push(format!("The file is not a valid package archive: {e}"));
                return Ok(report);
            }
        };

        if archive.len() > policy.max_entries {
            report.errors.push(format!(
                "The package has {} entries, more than the allowed {}",
                archive.len(),
                policy.max_entries
            ));
        }

        let scan = scan_entries(&mut archive, policy, &mut report.errors);

        if scan.declared_bytes > policy.max_uncompressed_bytes {
            report.errors.push(format!(
                "The package expands to {} bytes, more than the allowed {}",
                scan.declared_bytes, policy.max_uncompressed_bytes
            ));
        }
        if scan.ignored_top_level > 0 {
            report.info.push(format!(
                "Ignored {} file(s) outside the content and library folders",
                scan.ignored_top_level
            ));
        }

        match &scan.manifest {
            Slot::Absent => report
                .errors
                .push(format!("A valid package must contain a {MANIFEST_PATH} manifest")),
            Slot::Unread => {}
            Slot::Read(raw) => match PackageManifest::from_slice(raw) {
                Ok(manifest) => report.manifest = Some(manifest),
                Err(e) => report
                    .errors
                    .push(format!("Invalid manifest {MANIFEST_PATH}: {e}")),
            },
        }

        match &scan.content {
            Slot::Absent => report
                .errors
                .push(format!("A valid package must contain {CONTENT_PATH}")),
            Slot::Unread => {}
            Slot::Read(raw) => {
                if let Err(e) = serde_json::from_slice::<serde_json::Value>(raw) {
                    report
                        .errors
                        .push(format!("Invalid content document {CONTENT_PATH}: {e}"));
                }
            }
        }

        let bundled = parse_bundled_libraries(&scan.libraries, &mut report.errors);
        self.check_dependencies(
            report.manifest.as_ref(),
            &bundled,
            &mut report.errors,
            &mut report.info,
        )?;

        if !report.is_valid() {
            debug!(errors = report.errors.len(), "package rejected");
            return Ok(report);
        }

        let staged = self.staging.stage(bytes)?;
        info!(path = ?staged.path, digest = %staged.digest, "package accepted and staged");
        report.staging = Some(staged);
        Ok(report)
    }

    /// Every library the manifest or a bundled library preloads must be
    /// bundled in the package or installed in the registry.
    fn check_dependencies(
        &self,
        manifest: Option<&PackageManifest>,
        bundled: &[BundledLibrary],
        errors: &mut Vec<String>,
        notes: &mut Vec<String>,
    ) -> PackageResult<()> {
        let mut required: BTreeSet<&LibraryReference> = BTreeSet::new();
        if let Some(manifest) = manifest {
            required.extend(manifest.preloaded_dependencies.iter());
        }
        for library in bundled {
            required.extend(library.preloaded_dependencies.iter());
        }

        let bundled_refs: BTreeSet<&LibraryReference> =
            bundled.iter().map(|lib| &lib.reference).collect();

        let mut from_registry = 0usize;
        for dependency in required {
            if bundled_refs.contains(dependency) {
                continue;
            }
            let installed = self.registry.find_exact(
                &dependency.machine_name,
                dependency.major_version,
                dependency.minor_version,
            )?;
            if installed.is_some() {
                from_registry += 1;
            } else {
                errors.push(format!("Missing required library {dependency}"));
            }
        }

        if !bundled.is_empty() {
            let noun = if bundled.len() == 1 { "library" } else { "libraries" };
            notes.push(format!("The package bundles {} {noun}", bundled.len()));
        }
        if from_registry > 0 {
            let noun = if from_registry == 1 { "dependency" } else { "dependencies" };
            notes.push(format!("{from_registry} {noun} satisfied by installed libraries"));
        }
        Ok(())
    }
}

fn scan_entries<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    policy: &PackagePolicy,
    errors: &mut Vec<String>,
) -> Scan {
    let mut scan = Scan::default();

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(format!("Unable to read archive entry #{index}: {e}"));
                continue;
            }
        };
        let name = entry.name().to_string();

        if !is_safe_entry_path(&name) {
            errors.push(format!("The path {name:?} points outside the package"));
            continue;
        }
        let entry_size = entry.size();
        scan.declared_bytes = scan.declared_bytes.saturating_add(entry_size);

        if entry.is_dir() || is_hidden(&name) {
            continue;
        }

        let Some((top, rest)) = name.split_once('/') else {
            if name == MANIFEST_PATH {
                scan.manifest = read_entry(
                    &mut entry,
                    entry_size,
                    &name,
                    policy,
                    &mut scan.read_bytes,
                    errors,
                );
            } else {
                scan.ignored_top_level += 1;
            }
            continue;
        };

        if top == "content" {
            if name == CONTENT_PATH {
                scan.content = read_entry(
                    &mut entry,
                    entry_size,
                    &name,
                    policy,
                    &mut scan.read_bytes,
                    errors,
                );
            } else if !policy.allows(&name, false) {
                errors.push(format!("The file {name:?} has a file type that is not allowed"));
            }
            continue;
        }

        let slot = scan.libraries.entry(top.to_string()).or_default();
        if rest == LIBRARY_DESCRIPTOR {
            *slot = read_entry(
                &mut entry,
                entry_size,
                &name,
                policy,
                &mut scan.read_bytes,
                errors,
            );
        } else if !policy.allows(&name, true) {
            errors.push(format!("The file {name:?} has a file type that is not allowed"));
        }
    }

    scan
}

/// Decompress one entry without letting the package as a whole exceed
/// `policy.max_uncompressed_bytes`.
///
/// The declared size is checked first; the read itself is capped as well,
/// since headers may understate the real size.
fn read_entry(
    entry: &mut impl Read,
    declared: u64,
    name: &str,
    policy: &PackagePolicy,
    read_bytes: &mut u64,
    errors: &mut Vec<String>,
) -> Slot {
    let budget = policy.max_uncompressed_bytes.saturating_sub(*read_bytes);
    if declared > budget {
        errors.push(format!(
            "The file {name:?} was not read: it would exceed the allowed {} uncompressed bytes",
            policy.max_uncompressed_bytes
        ));
        return Slot::Unread;
    }

    let mut buf = Vec::new();
    if let Err(e) = entry.by_ref().take(budget.saturating_add(1)).read_to_end(&mut buf) {
        errors.push(format!("Unable to read {name:?}: {e}"));
        return Slot::Unread;
    }
    let len = buf.len() as u64;
    *read_bytes = read_bytes.saturating_add(len);
    if len > budget {
        errors.push(format!(
            "The file {name:?} expands beyond the allowed {} uncompressed bytes",
            policy.max_uncompressed_bytes
        ));
        return Slot::Unread;
    }
    Slot::Read(buf)
}

fn parse_bundled_libraries(
    folders: &BTreeMap<String, Slot>,
    errors: &mut Vec<String>,
) -> Vec<BundledLibrary> {
    let mut bundled = Vec::new();
    for (folder, descriptor) in folders {
        let raw = match descriptor {
            Slot::Read(raw) => raw,
            Slot::Unread => continue,
            Slot::Absent => {
                errors.push(format!("The library folder {folder:?} has no {LIBRARY_DESCRIPTOR}"));
                continue;
            }
        };
        match serde_json::from_slice::<BundledLibrary>(raw) {
            Ok(library) => bundled.push(library),
            Err(e) => errors.push(format!("Invalid {LIBRARY_DESCRIPTOR} in {folder:?}: {e}")),
        }
    }
    bundled
}

/// Returns `true` if extracting `name` under a root directory stays inside it.
///
/// Rejects empty names, absolute paths, backslashes, drive prefixes, NUL
/// bytes, and any `..` component.
pub fn is_safe_entry_path(name: &str) -> bool {
    if name.is_empty() || name.starts_with('/') {
        return false;
    }
    if name.contains('\\') || name.contains(':') || name.contains('\0') {
        return false;
    }
    name.split('/').all(|component| component != "..")
}

/// Dot-files and resource-fork folders are skipped without complaint.
fn is_hidden(name: &str) -> bool {
    name.split('/')
        .any(|component| component.starts_with('.') || component == "__MACOSX")
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::thread;

    use icp_library::{InMemoryLibraryRegistry, InstalledLibrary, LibraryError};
    use icp_types::LibraryId;
    use zip::write::SimpleFileOptions;

    use super::*;

    /// Registry whose backend is unreachable.
    struct OfflineRegistry;

    impl LibraryRegistry for OfflineRegistry {
        fn find_exact(&self, _: &str, _: u32, _: u32) -> icp_library::Result<Option<LibraryId>> {
            Err(LibraryError::Registry("connection refused".into()))
        }

        fn has_runnable(&self) -> icp_library::Result<bool> {
            Err(LibraryError::Registry("connection refused".into()))
        }
    }

    fn small_policy(max_uncompressed_bytes: u64) -> PackagePolicy {
        PackagePolicy {
            max_uncompressed_bytes,
            ..PackagePolicy::default()
        }
    }
    use crate::error::PackageError;

    const MANIFEST: &str = r#"{
        "title": "Quiz",
        "language": "en",
        "mainLibrary": "H5P.MultiChoice",
        "preloadedDependencies": [
            {"machineName": "H5P.MultiChoice", "majorVersion": 1, "minorVersion": 16}
        ]
    }"#;

    fn zip_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn valid_package() -> Vec<u8> {
        zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", br#"{"question": "2+2?"}"#),
            ("content/images/cat.png", b"\x89PNG"),
        ])
    }

    fn registry() -> Arc<InMemoryLibraryRegistry> {
        Arc::new(InMemoryLibraryRegistry::from_libraries([InstalledLibrary {
            id: LibraryId(1),
            reference: LibraryReference::new("H5P.MultiChoice", 1, 16),
            runnable: true,
        }]))
    }

    fn validator(dir: &tempfile::TempDir) -> PackageValidator {
        PackageValidator::new(registry(), StagingArea::new(dir.path()))
    }

    #[test]
    fn valid_package_is_staged() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = valid_package();
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();

        assert!(report.is_valid(), "errors: {:?}", report.errors);
        let staged = report.staging.unwrap();
        assert_eq!(std::fs::read(&staged.path).unwrap(), bytes);
        assert_eq!(report.manifest.unwrap().title, "Quiz");
        assert!(report.info.iter().any(|m| m.contains("installed libraries")));
    }

    #[test]
    fn garbage_is_not_an_archive() {
        let dir = tempfile::tempdir().unwrap();
        let report = validator(&dir)
            .validate(b"definitely not a zip", &PackagePolicy::default())
            .unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("not a valid package archive"));
        assert!(report.staging.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_manifest_and_content_are_both_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[("content/images/cat.png", b"x")]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();

        assert!(report.errors.iter().any(|e| e.contains("h5p.json")));
        assert!(report.errors.iter().any(|e| e.contains("content/content.json")));
        assert!(report.staging.is_none());
    }

    #[test]
    fn invalid_manifest_json() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", b"{oops"),
            ("content/content.json", b"{}"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Invalid manifest"));
    }

    #[test]
    fn invalid_content_document() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"not json"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("content document"));
    }

    #[test]
    fn path_traversal_entries_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            ("content/../../etc/passwd.txt", b"root"),
            ("../outside.json", b"{}"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        let outside: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("outside the package"))
            .collect();
        assert_eq!(outside.len(), 2);
        assert!(report.staging.is_none());
    }

    #[test]
    fn disallowed_file_types_are_each_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            ("content/run.exe", b"MZ"),
            ("content/script.js", b"alert(1)"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().all(|e| e.contains("not allowed")));
    }

    #[test]
    fn unsatisfied_dependency_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = MANIFEST.replace("\"minorVersion\": 16", "\"minorVersion\": 17");
        let bytes = zip_of(&[
            ("h5p.json", manifest.as_bytes()),
            ("content/content.json", b"{}"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(
            report.errors,
            vec!["Missing required library H5P.MultiChoice 1.17".to_string()]
        );
    }

    #[test]
    fn bundled_library_satisfies_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let empty = Arc::new(InMemoryLibraryRegistry::new());
        let validator = PackageValidator::new(empty, StagingArea::new(dir.path()));
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            (
                "H5P.MultiChoice-1.16/library.json",
                br#"{"machineName": "H5P.MultiChoice", "majorVersion": 1, "minorVersion": 16}"#,
            ),
            ("H5P.MultiChoice-1.16/js/multichoice.js", b"//"),
        ]);
        let report = validator.validate(&bytes, &PackagePolicy::default()).unwrap();
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.info.iter().any(|m| m.contains("bundles 1")));
    }

    #[test]
    fn bundled_library_dependencies_are_checked_too() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            (
                "H5P.Question-1.5/library.json",
                br#"{"machineName": "H5P.Question", "majorVersion": 1, "minorVersion": 5,
                     "preloadedDependencies": [{"machineName": "JoubelUI", "majorVersion": 1, "minorVersion": 3}]}"#,
            ),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(
            report.errors,
            vec!["Missing required library JoubelUI 1.3".to_string()]
        );
    }

    #[test]
    fn library_folder_without_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            ("Stray-1.0/stray.js", b"//"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("has no library.json"));
    }

    #[test]
    fn hidden_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", b"{}"),
            ("__MACOSX/content/._content.json", b"junk"),
            ("content/.DS_Store", b"junk"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn policy_limits_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let policy = PackagePolicy {
            max_entries: 2,
            max_uncompressed_bytes: 4,
            ..PackagePolicy::default()
        };
        let report = validator(&dir).validate(&valid_package(), &policy).unwrap();
        assert!(report.errors.iter().any(|e| e.contains("entries")));
        assert!(report.errors.iter().any(|e| e.contains("expands to")));
    }

    #[test]
    fn oversized_entry_is_not_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = vec![b' '; 64 * 1024];
        content.extend_from_slice(b"{}");
        let bytes = zip_of(&[
            ("h5p.json", MANIFEST.as_bytes()),
            ("content/content.json", &content),
        ]);

        let report = validator(&dir).validate(&bytes, &small_policy(1024)).unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("content/content.json") && e.contains("was not read")));
        assert!(report.errors.iter().any(|e| e.contains("expands to")));
        assert!(!report.errors.iter().any(|e| e.starts_with("Invalid content document")));
        assert!(!report.errors.iter().any(|e| e.starts_with("A valid package must contain")));
        assert!(report.staging.is_none());
    }

    #[test]
    fn understated_entry_size_is_capped() {
        let policy = small_policy(1024);
        let mut errors = Vec::new();
        let mut read_bytes = 0;
        let mut entry = Cursor::new(vec![b' '; 4096]);

        let slot = read_entry(
            &mut entry,
            0,
            "content/content.json",
            &policy,
            &mut read_bytes,
            &mut errors,
        );
        assert!(matches!(slot, Slot::Unread));
        assert_eq!(read_bytes, 1025);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expands beyond the allowed 1024"));
    }

    #[test]
    fn size_budget_is_shared_across_entries() {
        let policy = small_policy(1024);
        let mut errors = Vec::new();
        let mut read_bytes = 0;

        let first = read_entry(
            &mut Cursor::new(vec![b' '; 600]),
            600,
            MANIFEST_PATH,
            &policy,
            &mut read_bytes,
            &mut errors,
        );
        assert!(matches!(first, Slot::Read(ref buf) if buf.len() == 600));
        assert!(errors.is_empty());

        let second = read_entry(
            &mut Cursor::new(vec![b' '; 600]),
            600,
            CONTENT_PATH,
            &policy,
            &mut read_bytes,
            &mut errors,
        );
        assert!(matches!(second, Slot::Unread));
        assert_eq!(read_bytes, 600);
        assert!(errors[0].contains("was not read"));
    }

    #[test]
    fn registry_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let validator =
            PackageValidator::new(Arc::new(OfflineRegistry), StagingArea::new(dir.path()));

        let err = validator
            .validate(&valid_package(), &PackagePolicy::default())
            .unwrap_err();
        assert!(matches!(err, PackageError::Registry(LibraryError::Registry(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn multiple_problems_surface_together() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = zip_of(&[
            ("content/../x.json", b"{}"),
            ("content/virus.exe", b"MZ"),
        ]);
        let report = validator(&dir).validate(&bytes, &PackagePolicy::default()).unwrap();
        // traversal, file type, missing manifest, missing content
        assert_eq!(report.errors.len(), 4);
        assert_eq!(report.messages().count(), report.errors.len() + report.info.len());
    }

    #[test]
    fn staging_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let validator = PackageValidator::new(registry(), StagingArea::new(blocker.join("sub")));

        let err = validator
            .validate(&valid_package(), &PackagePolicy::default())
            .unwrap_err();
        assert!(matches!(err, PackageError::StagingIo { .. }));
    }

    #[test]
    fn concurrent_validations_never_share_a_staging_path() {
        let dir = tempfile::tempdir().unwrap();
        let validator = Arc::new(validator(&dir));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let validator = Arc::clone(&validator);
                thread::spawn(move || {
                    let content = format!(r#"{{"question": "{i}"}}"#);
                    let bytes = zip_of(&[
                        ("h5p.json", MANIFEST.as_bytes()),
                        ("content/content.json", content.as_bytes()),
                    ]);
                    validator
                        .validate(&bytes, &PackagePolicy::default())
                        .unwrap()
                        .staging
                        .unwrap()
                        .path
                })
            })
            .collect();

        let paths: BTreeSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(paths.len(), 16);
    }

    #[test]
    fn safe_entry_paths() {
        assert!(is_safe_entry_path("h5p.json"));
        assert!(is_safe_entry_path("content/images/a.png"));
        assert!(is_safe_entry_path("content/./a.png"));
        assert!(is_safe_entry_path("content/a..b.png"));

        assert!(!is_safe_entry_path(""));
        assert!(!is_safe_entry_path("/etc/passwd"));
        assert!(!is_safe_entry_path("../evil"));
        assert!(!is_safe_entry_path("content/../../evil"));
        assert!(!is_safe_entry_path("content\\..\\evil"));
        assert!(!is_safe_entry_path("C:/Windows/evil"));
    }
}
