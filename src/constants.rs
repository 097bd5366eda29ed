//! Process-wide constants: sentinel identities and the built-in exclusion
//! sets overlaid by user configuration.

use chrono::NaiveDate;

/// Assignee recorded when an annotation carries no (or an empty) `@user`
/// token.
pub const UNKNOWN_USER_NAME: &str = "JANE_DOE";

/// Due date recorded when an annotation carries no date token or the token
/// cannot be parsed. Far enough in the future that downstream windowing
/// never classifies it as overdue or upcoming.
pub const DEFAULT_COMPLETION_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 25) {
    Some(date) => date,
    None => panic!("sentinel completion date is valid"),
};

/// Display names of the built-in summary generators.
pub const TODO_BY_MODULE: &str = "Module-wise Summary";
pub const EXPIRED_TODO_BY_USER: &str = "Expired TODO Items";
pub const UPCOMING_TODO_BY_USER: &str = "Upcoming Week TODO Items";

/// Directory name patterns excluded by default (anchored regex, matched
/// against the directory's base name).
pub const DEFAULT_EXCLUDE_DIR_PATTERNS: &[&str] = &[
    r".*[.]egg-info", // Distribution / packaging
    r".*[.]cover",    // Unit test / coverage reports
];

/// Directory names excluded by default.
pub const DEFAULT_EXCLUDE_DIR_NAMES: &[&str] = &[
    "__pycache__",
    ".git",            // VCS
    ".hg",             // VCS
    ".svn",            // VCS
    ".env",            // Environments
    ".venv",           // Environments
    "env",             // Environments
    "venv",            // Environments
    "node_modules",    // Package managers
    "vendor",          // Package managers
    ".history",        // VS Code
    ".vscode",         // VS Code
    ".idea",           // JetBrains
    "build",           // Distribution / packaging
    "dist",            // Distribution / packaging
    "target",          // Cargo build output
    "wheels",          // Distribution / packaging
    "htmlcov",         // Unit test / coverage reports
    ".tox",            // Unit test / coverage reports
    ".nox",            // Unit test / coverage reports
    ".hypothesis",     // Unit test / coverage reports
    ".pytest_cache",   // Unit test / coverage reports
    ".mypy_cache",     // mypy
    ".cache",          // Cache/temp
    "coverage",        // Unit test / coverage reports
    "_build",          // Sphinx documentation
    "site",            // mkdocs documentation
    "migrations",      // DB migrations
    "__pypackages__",  // PEP 582
];

/// File name patterns excluded by default (anchored regex, matched against
/// the file's base name).
pub const DEFAULT_EXCLUDE_FILE_PATTERNS: &[&str] = &[
    r".*[.]py[cod]",      // Byte-compiled / optimized files
    r".*[.]py[.]class",   // Byte-compiled / optimized files
    r".*[.]so",           // C extensions
    r".*[.]manifest",     // PyInstaller
    r".*[.]spec",         // PyInstaller
    r".*[.]coverage[.]*", // Unit test / coverage reports
    r".*[.]cache",        // Unit test / coverage reports
    r".*[.]mo",           // Translations
    r".*[.]pot",          // Translations
    r".*[.]log",          // Log output
];

/// File names excluded by default.
pub const DEFAULT_EXCLUDE_FILE_NAMES: &[&str] = &[
    ".coverage",            // Unit test / coverage reports
    "coverage.xml",         // Unit test / coverage reports
    "nosetests.xml",        // Unit test / coverage reports
    "pip-log.txt",          // Installer logs
    "local_settings.py",    // Django
    "db.sqlite3",           // Django
    "db.sqlite3-journal",   // Django
    ".webassets-cache",     // Flask
    ".scrapy",              // Scrapy
    ".ipynb_checkpoints",   // Jupyter Notebook
    "ipython_config.py",    // IPython
    ".python-version",      // pyenv
    "celerybeat-schedule",  // Celery
    "celerybeat.pid",       // Celery
    ".dmypy.json",          // mypy
    "dmypy.json",           // mypy
];
