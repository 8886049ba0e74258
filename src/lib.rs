mod domain;
mod infrastructure;
mod interfaces;

pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, password, scoring, use_cases};
pub use infrastructure::{auth, db, storage};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{
    SqlxApplicationRepo, SqlxBlogRepo, SqlxMentorshipRepo, SqlxMessageRepo, SqlxProjectRepo,
    SqlxUserRepo,
};
use storage::files::FileStore;
use use_cases::applications::ApplicationService;
use use_cases::auth::AuthService;
use use_cases::blog::BlogService;
use use_cases::mentorship::MentorshipService;
use use_cases::messaging::MessagingService;
use use_cases::profile::ProfileService;
use use_cases::projects::ProjectService;
use use_cases::uploads::UploadService;

pub type AppAuthService = AuthService<SqlxUserRepo>;
pub type AppProfileService = ProfileService<SqlxUserRepo>;
pub type AppProjectService = ProjectService<SqlxProjectRepo, SqlxApplicationRepo, SqlxUserRepo>;
pub type AppApplicationService = ApplicationService<SqlxApplicationRepo, SqlxProjectRepo>;
pub type AppMentorshipService = MentorshipService<SqlxMentorshipRepo, SqlxUserRepo>;
pub type AppMessagingService = MessagingService<SqlxMessageRepo, SqlxUserRepo>;
pub type AppBlogService = BlogService<SqlxBlogRepo>;
pub type AppUploadService = UploadService<SqlxUserRepo, SqlxProjectRepo, SqlxBlogRepo>;

pub struct AppState {
    pub auth: AppAuthService,
    pub profiles: AppProfileService,
    pub projects: AppProjectService,
    pub applications: AppApplicationService,
    pub mentorship: AppMentorshipService,
    pub messaging: AppMessagingService,
    pub blog: AppBlogService,
    pub uploads: AppUploadService,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::SqlitePool) -> Self {
        let jwt_service = JwtService::new(config);
        let file_store = FileStore::new(config.upload_dir.clone());

        let user_repo = SqlxUserRepo::new(pool.clone());
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let application_repo = SqlxApplicationRepo::new(pool.clone());
        let mentorship_repo = SqlxMentorshipRepo::new(pool.clone());
        let blog_repo = SqlxBlogRepo::new(pool.clone());
        let message_repo = SqlxMessageRepo::new(pool);

        AppState {
            auth: AuthService::new(user_repo.clone(), jwt_service),
            profiles: ProfileService::new(user_repo.clone()),
            projects: ProjectService::new(
                project_repo.clone(),
                application_repo.clone(),
                user_repo.clone(),
            ),
            applications: ApplicationService::new(application_repo, project_repo.clone()),
            mentorship: MentorshipService::new(mentorship_repo, user_repo.clone()),
            messaging: MessagingService::new(message_repo, user_repo.clone()),
            blog: BlogService::new(blog_repo.clone()),
            uploads: UploadService::new(file_store, user_repo, project_repo, blog_repo),
        }
    }
}
