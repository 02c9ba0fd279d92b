use crate::app::cli::{Cli, Command};
use crate::config::{ApiConfig, CloudinaryConfig, LayoutConfig};
use crate::handler::{auth_handler, enquiry_handler, upload_handler};
use crate::model::schema::EnquiryKind;
use crate::repository::enquiry_repo::{EnquiryRepository, RestEnquiryRepository};
use crate::repository::static_repo::StaticEnquiryRepository;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::enquiry_table::EnquiryTable;
use crate::service::submission_service::SubmissionServiceImpl;
use crate::service::upload_service::CloudinaryUploader;
use crate::util::credentials::{CredentialProvider, StaticCredentials, TokenFile};
use crate::util::error::ServiceError;
use crate::util::notifier::TerminalNotifier;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub type AdminTable = EnquiryTable<Box<dyn EnquiryRepository>, Arc<TerminalNotifier>>;

pub struct App {
    api: ApiConfig,
    layout: LayoutConfig,
    credentials: Arc<dyn CredentialProvider>,
    notifier: Arc<TerminalNotifier>,
    demo: bool,
}

impl App {
    pub fn from_env(demo: bool, assume_yes: bool) -> Result<Self, ServiceError> {
        let api = ApiConfig::from_env()?;
        let layout = LayoutConfig::from_env()?;

        // An explicit token wins over the one saved by `login`.
        let credentials: Arc<dyn CredentialProvider> = match api.token.clone() {
            Some(token) => {
                debug!("Using token from EGS_TOKEN");
                Arc::new(StaticCredentials::new(Some(token)))
            }
            None => Arc::new(TokenFile::new(api.token_file.clone())),
        };

        Ok(Self {
            api,
            layout,
            credentials,
            notifier: Arc::new(TerminalNotifier::new(assume_yes)),
            demo,
        })
    }

    pub fn table(&self, kind: EnquiryKind) -> Result<AdminTable, ServiceError> {
        let repo: Box<dyn EnquiryRepository> = if self.demo {
            info!(kind = %kind, "Using demo data");
            Box::new(StaticEnquiryRepository::demo(kind))
        } else {
            Box::new(RestEnquiryRepository::new(
                self.api.clone(),
                kind.schema(),
                self.credentials.clone(),
            )?)
        };
        Ok(EnquiryTable::new(repo, self.notifier.clone(), self.layout))
    }

    fn uploader(&self) -> Result<CloudinaryUploader, ServiceError> {
        let timeout = Duration::from_secs(self.api.timeout_secs);
        Ok(CloudinaryUploader::new(CloudinaryConfig::from_env()?, timeout)?)
    }

    pub async fn run(self, cli: Cli) -> Result<(), ServiceError> {
        match cli.command {
            Command::Enquiries { kind, action } => {
                let mut table = self.table(kind)?;
                enquiry_handler::handle(&mut table, action).await
            }
            Command::Login { email, code } => {
                let auth = AuthServiceImpl::new(self.api.clone(), self.credentials.clone())?;
                auth_handler::login(&auth, &email, code.as_deref()).await
            }
            Command::Whoami => {
                let auth = AuthServiceImpl::new(self.api.clone(), self.credentials.clone())?;
                auth_handler::whoami(&auth).await
            }
            Command::Logout => {
                let auth = AuthServiceImpl::new(self.api.clone(), self.credentials.clone())?;
                auth_handler::logout(&auth);
                Ok(())
            }
            Command::Upload { path } => upload_handler::upload(&self.uploader()?, &path).await,
            Command::Submit(args) => {
                let service = SubmissionServiceImpl::new(self.api.clone(), Arc::new(self.uploader()?))?;
                upload_handler::submit(&service, args).await
            }
        }
    }
}
