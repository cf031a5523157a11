mod init;
mod list;
mod options;
mod priority;
mod serve;
mod show;
mod status;
mod submit;
mod utils;

pub use init::handle_init;
pub use list::{ListParams, handle_list};
pub use options::handle_options;
pub use priority::handle_priority;
pub use serve::handle_serve;
pub use show::handle_show;
pub use status::handle_status;
pub use submit::{SubmitParams, handle_submit};

use crate::config::PlaintsConfig;
use crate::intake::Intake;
use crate::storage::{ComplaintRepository, OptionRepository};
use crate::taxonomy::TaxonomyResolver;
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: PlaintsConfig,
    pub root: PathBuf,
    pub complaints: ComplaintRepository,
    pub options: OptionRepository,
}

impl CommandContext {
    pub fn new(config: PlaintsConfig, root: PathBuf) -> Self {
        let complaints = ComplaintRepository::new(&config, &root);
        let options = OptionRepository::new(&config, &root);
        Self {
            config,
            root,
            complaints,
            options,
        }
    }

    pub fn resolver(&self) -> TaxonomyResolver {
        TaxonomyResolver::new(Arc::new(self.options.clone()))
    }

    pub fn intake(&self) -> Intake {
        Intake::new(
            Arc::new(self.resolver()),
            Arc::new(self.complaints.clone()),
            &self.config.store,
        )
    }
}
