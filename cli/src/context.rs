use crate::parse;
use campus_store::RecordStore;
use campus_store::factory;
use campus_store::factory::Backend;
use campus_store::identity::EnvIdentity;
use campus_store::identity::Identity;
use campus_store::identity::StaticIdentity;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::SubsecRound;
use chrono::Utc;
use std::path::PathBuf;

/// Flags accepted by every subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Base directory; the store lives in `<dir>/.campus/store/`. Defaults to
    /// the home directory.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Storage backend. Defaults to `CAMPUS_STORE_BACKEND`, then jsonl.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    /// User id to act as. Defaults to `CAMPUS_USER_ID`.
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Pretend the current time is this instant (RFC 3339).
    #[arg(long, global = true, hide = true, value_parser = parse::datetime)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    Jsonl,
    Sqlite,
}

impl From<BackendArg> for Backend {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Jsonl => Backend::Jsonl,
            BackendArg::Sqlite => Backend::Sqlite,
        }
    }
}

impl GlobalArgs {
    /// Current time truncated to whole seconds, so stored timestamps compare
    /// correctly as strings.
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now).trunc_subsecs(0)
    }
}

/// Everything a command needs at run time: an explicitly owned store handle,
/// the identity provider and the clock reading for this invocation.
pub struct Context {
    pub store: Box<dyn RecordStore>,
    identity: Box<dyn Identity>,
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let base = match &global.store_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("cannot locate home directory; pass --store-dir"))?,
        };
        let store = factory::open_store(&base, global.backend.map(Backend::from))?;
        let identity: Box<dyn Identity> = match &global.user {
            Some(user) => Box::new(StaticIdentity(user.clone())),
            None => Box::new(EnvIdentity),
        };
        Ok(Self {
            store,
            identity,
            now: global.now(),
        })
    }

    pub fn user_id(&self) -> Option<String> {
        self.identity.current_user_id()
    }

    pub fn require_user(&self) -> anyhow::Result<String> {
        Ok(self.identity.require_user_id()?)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
