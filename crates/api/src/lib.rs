mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use job_schedulers::ReminderJobHandle;
use job_schedulers::start_send_reminders_job;
use roamio_reminders_infra::RoamioContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    reminder_job: ReminderJobHandle,
}

impl Application {
    pub async fn new(context: RoamioContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let reminder_job = start_send_reminders_job(context);

        Ok(Self {
            server,
            port,
            reminder_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: RoamioContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        // The server is gone, take the reminder job down with it
        self.reminder_job.stop();
        res
    }
}
