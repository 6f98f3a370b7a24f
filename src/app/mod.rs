mod wiring;

use crate::{auth::AuthProvider, cli, context, controller::IndexController, rest};
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App {
    ctx: context::Context,
    controller: IndexController,
    auth: Arc<dyn AuthProvider>,
    shutdown: CancellationToken,
}

impl App {
    /// Builds the App from CLI arguments, including the log file side-effect.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        if let Err(e) = crate::tracing::set_log_file(ctx.log_file.as_deref()) {
            log::warn!("Could not open log file: {}", e);
        }
        log_startup_info(&ctx);

        let repos = wiring::load_repositories(&ctx)?;
        let controller = wiring::build_controller(&ctx, repos)?;
        let auth = wiring::build_auth(&ctx);

        Ok((App::new(ctx, controller, auth), cli))
    }

    pub fn new(
        ctx: context::Context,
        controller: IndexController,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            ctx,
            controller,
            auth,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn controller(&self) -> &IndexController {
        &self.controller
    }

    /// Main entry point for the daemon.
    pub async fn run_daemon(&mut self) -> Result<()> {
        self.log_runtime_config();

        let listener = rest::bind(self.ctx.api_listen).await?;

        let resumed = self.controller.resume_pending();
        if resumed > 0 {
            log::info!("🔁 Resumed {} pending indexing job(s)", resumed);
        }

        let mut rest_handle = self.spawn_rest_server(listener);
        self.wait_for_shutdown(&mut rest_handle).await
    }

    fn spawn_rest_server(&self, listener: TcpListener) -> JoinHandle<()> {
        let state = rest::AppState::new(self.controller.clone(), self.auth.clone());
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(listener, state, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();
        self.controller.shutdown();

        // Polling a finished JoinHandle again panics.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.ctx.api_listen);
        log::info!("⏱️ Index delay: {:?}", self.ctx.index_delay);
        if let Some(path) = self.ctx.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting raghub");
    log::info!("👤 Session user: {}", ctx.user.display_name());
}

pub async fn run() -> Result<()> {
    let (mut app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        return cmd.run(&app.ctx, &app.controller).await;
    }

    app.run_daemon().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenAuth;
    use crate::controller::DelayJob;
    use crate::source::{FixtureSource, RepositorySource};
    use crate::types::{IndexStatus, SessionUser};
    use std::time::Duration;

    fn make_ctx(port: u16) -> context::Context {
        context::Context {
            repos_file: None,
            index_delay: Duration::from_millis(10),
            api_listen: format!("127.0.0.1:{}", port).parse().unwrap(),
            api_token: "dev".into(),
            user: SessionUser::default(),
            log_file: None,
        }
    }

    fn make_app(port: u16) -> App {
        let ctx = make_ctx(port);
        let controller = IndexController::new(
            FixtureSource.load().unwrap(),
            Arc::new(DelayJob::new(ctx.index_delay)),
        )
        .unwrap();
        let auth = Arc::new(StaticTokenAuth::new("dev", SessionUser::default()));
        App::new(ctx, controller, auth)
    }

    #[test]
    fn load_repositories_defaults_to_fixture() {
        let repos = wiring::load_repositories(&make_ctx(0)).unwrap();
        assert_eq!(repos.len(), 4);
    }

    #[test]
    fn build_controller_rejects_duplicate_ids() {
        let repos = vec![
            crate::types::Repository::new(1, "me/a"),
            crate::types::Repository::new(1, "me/b"),
        ];
        let err = wiring::build_controller(&make_ctx(0), repos).err().unwrap();
        assert!(format!("{:#}", err).contains("duplicate repository id: 1"));
    }

    #[tokio::test]
    async fn resume_pending_completes_fixture_repository() {
        let app = make_app(0);
        assert_eq!(app.controller().resume_pending(), 1);
        let reached = app
            .controller()
            .wait_for_status(3, IndexStatus::Indexed, Duration::from_secs(2))
            .await
            .unwrap();
        assert!(reached);
    }

    #[tokio::test]
    async fn run_daemon_fails_when_address_is_taken() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let mut app = make_app(port);

        let err = app.run_daemon().await.unwrap_err();
        assert!(format!("{:#}", err).contains("binding REST API"));
    }

    #[tokio::test]
    async fn wait_for_shutdown_exits_when_task_finishes() {
        let app = make_app(0);

        let mut rest_task = tokio::spawn(async {});

        let res = app.wait_for_shutdown(&mut rest_task).await;
        assert!(res.is_ok());
        assert!(app.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn spawn_rest_server_starts_and_serves_health_check() {
        let app = make_app(0);
        let listener = rest::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = app.spawn_rest_server(listener);
        assert!(
            !handle.is_finished(),
            "REST server task finished unexpectedly"
        );

        let stream = tokio::net::TcpStream::connect(addr).await;
        assert!(stream.is_ok(), "Failed to connect to REST server");
        let mut stream = stream.unwrap();

        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        let response = String::from_utf8_lossy(&buffer);

        assert!(response.contains("200 OK"));
        assert!(response.contains("uptimeSecs"));

        app.shutdown.cancel();
        let _ = handle.await;
    }
}
