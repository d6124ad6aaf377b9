//! Convert command - Turn `.cursor` rules into `c2c-rules` trees

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::utils;
use c2c::claude::convert::output_paths;
use c2c::claude::index::{build_entries, generate_index, Category};
use c2c::claude::{CompanionChange, CompanionUpdater, PathRemapper, RemapMode, RuleConverter};
use c2c::config::Layout;
use c2c::cursor::frontmatter::parse_rules;
use c2c::cursor::{FileSystem, LocalFs, ScanDiagnostic, ScanOutcome, Scanner, SourceFile};

/// Options for the convert command
pub struct ConvertOptions {
    /// Directory to scan (current directory if omitted)
    pub root: Option<PathBuf>,
    /// Write everything into one tree at the scan root
    pub flat: bool,
    /// Print a JSON report instead of progress lines
    pub json: bool,
}

/// Result of converting one output root
#[derive(Debug, Serialize)]
pub struct RootReport {
    /// Marker directories whose rules went into this root
    pub marker_dirs: Vec<PathBuf>,
    /// The `c2c-rules` directory
    pub output_dir: PathBuf,
    /// Converted files, in scan order
    pub files: Vec<PathBuf>,
    /// Number of rules listed in the index
    pub indexed: usize,
    pub index_file: PathBuf,
    pub companion_file: PathBuf,
    pub companion: CompanionChange,
}

/// Everything a run produced
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub root: PathBuf,
    pub mode: RemapMode,
    pub roots: Vec<RootReport>,
    /// Non-fatal scan problems
    pub warnings: Vec<String>,
}

/// Execute the convert command
pub fn execute(options: ConvertOptions) -> Result<()> {
    let root = utils::resolve_root(options.root.as_deref())?;
    let layout = Layout::default();
    let progress = Progress {
        enabled: !options.json,
        base: root.clone(),
    };

    let report = run(&LocalFs, &layout, &root, options.flat, &progress)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Run the conversion below `root`
pub fn run(
    fs: &dyn FileSystem,
    layout: &Layout,
    root: &Path,
    flat: bool,
    progress: &Progress,
) -> Result<ConversionReport> {
    let pipeline = Pipeline {
        fs,
        layout,
        scanner: Scanner::new(fs, layout),
        root,
        progress,
    };

    let mut report = ConversionReport {
        root: root.to_path_buf(),
        mode: if flat {
            RemapMode::Flat
        } else {
            RemapMode::PerMarker
        },
        roots: Vec::new(),
        warnings: Vec::new(),
    };

    if flat {
        pipeline.run_flat(&mut report)?;
    } else {
        pipeline.run_per_marker(&mut report)?;
    }

    Ok(report)
}

/// Progress lines on stdout, warnings on stderr
pub struct Progress {
    pub enabled: bool,
    /// Printed paths are shown relative to this directory
    pub base: PathBuf,
}

impl Progress {
    fn say(&self, message: &str) {
        if self.enabled {
            println!("{}", message);
        }
    }

    fn done(&self, verb: &str, path: &Path) {
        if self.enabled {
            println!(
                "{} {} {}",
                "✓".green(),
                verb,
                utils::display_relative(path, &self.base)
            );
        }
    }

    fn warn(&self, diagnostic: &ScanDiagnostic) {
        eprintln!("{} {}", "Warning:".yellow(), diagnostic);
    }
}

struct Pipeline<'a> {
    fs: &'a dyn FileSystem,
    layout: &'a Layout,
    scanner: Scanner<'a>,
    root: &'a Path,
    progress: &'a Progress,
}

impl Pipeline<'_> {
    /// One output tree next to every marker directory
    fn run_per_marker(&self, report: &mut ConversionReport) -> Result<()> {
        let root_marker = self.scanner.find_root_marker_directory(self.root);
        let sub_markers = self.collect(report, self.scanner.find_sub_marker_directories(self.root));

        if root_marker.is_none() && sub_markers.is_empty() {
            self.progress.say(&format!(
                "No {} directories with {} files found.",
                self.layout.marker_dir, self.layout.rule_extension
            ));
            return Ok(());
        }

        if let Some(marker) = root_marker {
            self.progress.say(&format!(
                "Processing root {} directory...",
                self.layout.marker_dir
            ));
            let files = self.collect(report, self.scanner.load_rule_files(&marker, self.root));
            if !files.is_empty() {
                let root_report = self.process(vec![marker], files, self.root, RemapMode::PerMarker)?;
                report.roots.push(root_report);
            }
        }

        for marker in sub_markers {
            self.progress.say(&format!(
                "Processing {}...",
                utils::display_relative(&marker, self.root)
            ));
            let files = self.collect(report, self.scanner.load_rule_files(&marker, self.root));
            if files.is_empty() {
                continue;
            }
            let scope_root = marker.parent().unwrap_or(self.root).to_path_buf();
            let root_report = self.process(vec![marker], files, &scope_root, RemapMode::PerMarker)?;
            report.roots.push(root_report);
        }

        self.progress.say("\nConversion completed successfully!");
        Ok(())
    }

    /// One shared output tree at the scan root
    fn run_flat(&self, report: &mut ConversionReport) -> Result<()> {
        let markers = self.collect(report, self.scanner.find_marker_directories(self.root));

        let mut seen = HashSet::new();
        let mut marker_dirs = Vec::new();
        let mut files = Vec::new();
        for marker in markers {
            let found = self.collect(report, self.scanner.load_rule_files(&marker, self.root));
            let fresh: Vec<SourceFile> = found
                .into_iter()
                .filter(|f| seen.insert(f.absolute_path.clone()))
                .collect();
            if !fresh.is_empty() {
                marker_dirs.push(marker);
                files.extend(fresh);
            }
        }

        if files.is_empty() {
            self.progress.say(&format!(
                "No {} directories with {} files found.",
                self.layout.marker_dir, self.layout.rule_extension
            ));
            return Ok(());
        }

        self.progress.say(&format!(
            "Processing {} {} director{}...",
            marker_dirs.len(),
            self.layout.marker_dir,
            if marker_dirs.len() == 1 { "y" } else { "ies" }
        ));
        let root_report = self.process(marker_dirs, files, self.root, RemapMode::Flat)?;
        report.roots.push(root_report);

        self.progress.say("\nConversion completed successfully!");
        Ok(())
    }

    /// scan results → parse → convert → index → companion
    fn process(
        &self,
        marker_dirs: Vec<PathBuf>,
        files: Vec<SourceFile>,
        scope_root: &Path,
        mode: RemapMode,
    ) -> Result<RootReport> {
        let rules = parse_rules(&files);

        let output_dir = self.layout.output_root_for(scope_root);
        let remapper = PathRemapper::new(self.layout, output_dir.clone(), mode);
        let converter = RuleConverter::new(self.fs, &remapper, scope_root);

        self.progress.say(&format!(
            "Converting files to {} directory...",
            self.layout.output_dir
        ));
        let converted = converter.convert(&rules)?;
        let files = output_paths(&converted);
        for path in &files {
            self.progress.done("Created", path);
        }

        let indexed = build_entries(&converted)
            .iter()
            .filter(|e| e.category != Category::Uncategorized)
            .count();
        let index_file = generate_index(self.fs, &self.layout.index_path(&output_dir), &converted)?;
        self.progress.done("Generated", &index_file);

        let updater = CompanionUpdater::new(self.fs, self.layout)?;
        let (companion_file, companion) = updater.update(scope_root)?;
        let verb = match companion {
            CompanionChange::Created => "Created",
            CompanionChange::Updated => "Updated",
        };
        self.progress.done(verb, &companion_file);

        Ok(RootReport {
            marker_dirs,
            output_dir,
            files,
            indexed,
            index_file,
            companion_file,
            companion,
        })
    }

    /// Take a scan's entries, reporting its diagnostics
    fn collect<T>(&self, report: &mut ConversionReport, outcome: ScanOutcome<T>) -> Vec<T> {
        for diagnostic in &outcome.diagnostics {
            self.progress.warn(diagnostic);
            report.warnings.push(diagnostic.to_string());
        }
        outcome.entries
    }
}
