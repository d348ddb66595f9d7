use std::path::PathBuf;

use clap::Args;
use planner_core::DatabaseConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Everything the server needs, resolved once at startup and handed to
/// the components that use it.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` as handed to the listener; hostnames are resolved there.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Document-control fields printed in the spreadsheet header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Image placed in the top-left header block. Must exist when set.
    pub logo: Option<PathBuf>,
    pub form_code: String,
    pub form_date: String,
    pub form_revision: String,
    pub responsible: String,
    pub approved_by: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            logo: None,
            form_code: "F.082".into(),
            form_date: "22/03/2022".into(),
            form_revision: "01".into(),
            responsible: "RICARDO".into(),
            approved_by: "RICARDO".into(),
        }
    }
}

/// Flags shared by the commands that touch the database.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// SQLite database file [default: platform data directory]
    #[arg(long, env = "CREW_PLANNER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Database copied into place when the database file does not exist yet
    #[arg(long, env = "CREW_PLANNER_TEMPLATE_DB")]
    pub template_db: Option<PathBuf>,
}

impl DatabaseArgs {
    pub fn resolve(&self) -> DatabaseConfig {
        let mut config = match &self.database {
            Some(path) => DatabaseConfig::new(path),
            None => DatabaseConfig::default_location(),
        };
        config.template = self.template_db.clone();
        config
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port for the HTTP server
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "CREW_PLANNER_PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_BIND, env = "CREW_PLANNER_BIND")]
    pub bind: String,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Logo image for the spreadsheet header
    #[arg(long, env = "CREW_PLANNER_LOGO")]
    pub logo: Option<PathBuf>,

    #[arg(long, default_value = "F.082", env = "CREW_PLANNER_FORM_CODE")]
    pub form_code: String,

    #[arg(long, default_value = "22/03/2022", env = "CREW_PLANNER_FORM_DATE")]
    pub form_date: String,

    #[arg(long, default_value = "01", env = "CREW_PLANNER_FORM_REVISION")]
    pub form_revision: String,

    #[arg(long, default_value = "RICARDO", env = "CREW_PLANNER_RESPONSIBLE")]
    pub responsible: String,

    #[arg(long, default_value = "RICARDO", env = "CREW_PLANNER_APPROVED_BY")]
    pub approved_by: String,
}

impl ServeArgs {
    pub fn into_config(self) -> Config {
        Config {
            server: ServerConfig {
                bind: self.bind,
                port: self.port,
            },
            database: self.db.resolve(),
            export: ExportConfig {
                logo: self.logo,
                form_code: self.form_code,
                form_date: self.form_date,
                form_revision: self.form_revision,
                responsible: self.responsible,
                approved_by: self.approved_by,
            },
        }
    }
}
