use actix_web::{
    dev::Server,
    middleware::Logger as ActixLogger,
    web, App, Error as ActixError, HttpResponse, HttpServer, Responder,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::cors::{build_cors, resolve_origins};
use crate::dispatcher::Dispatcher;
use crate::error::KvError;
use crate::kv_store::{Database, KVStore};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: u16,
    pub entries: usize,
}

async fn handle_request<D: Database + 'static>(
    dispatcher: web::Data<Dispatcher<D>>,
    body: Result<web::Bytes, ActixError>,
) -> impl Responder {
    let (status, rsp) = match body {
        Ok(body) => dispatcher.dispatch_bytes(&body).await,
        // Oversized or broken bodies still get a JSON reply.
        Err(e) => {
            warn!("could not read request body: {}", e);
            let err = KvError::MalformedRequest(e.to_string());
            (err.status(), crate::types::Response::from(&err))
        }
    };
    HttpResponse::build(status).json(rsp)
}

async fn health<D: Database + 'static>(dispatcher: web::Data<Dispatcher<D>>) -> impl Responder {
    match dispatcher.database().len().await {
        Ok(entries) => HttpResponse::Ok().json(Health {
            status: 200,
            entries,
        }),
        Err(e) => {
            error!("health check failed: {}", e);
            HttpResponse::build(e.status()).json(crate::types::Response::from(&e))
        }
    }
}

/// Installs the store endpoint (`/`, any method) and `GET /health`.
/// Bodies larger than `max_body_bytes` are answered with a 400.
pub fn configure<D: Database + 'static>(
    dispatcher: web::Data<Dispatcher<D>>,
    max_body_bytes: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(dispatcher)
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .route("/health", web::get().to(health::<D>))
            .route("/", web::route().to(handle_request::<D>));
    }
}

/// One HTTP front end bound to its own store. Instances never share state.
pub struct KvServer {
    config: Config,
    dispatcher: web::Data<Dispatcher<KVStore>>,
}

impl KvServer {
    pub fn new(config: Config) -> Self {
        Self::with_store(config, KVStore::new())
    }

    pub fn with_store(config: Config, store: KVStore) -> Self {
        Self {
            config,
            dispatcher: web::Data::new(Dispatcher::new(store)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &KVStore {
        self.dispatcher.database()
    }

    pub fn routes(&self) -> impl FnOnce(&mut web::ServiceConfig) {
        configure(self.dispatcher.clone(), self.config.max_body_bytes)
    }

    /// Binds the listener and returns the running server future.
    pub fn run(self) -> std::io::Result<Server> {
        let origins = resolve_origins(&self.config.cors_file);
        let dispatcher = self.dispatcher.clone();
        let max_body_bytes = self.config.max_body_bytes;

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(ActixLogger::default())
                .wrap(build_cors(&origins))
                .configure(configure(dispatcher.clone(), max_body_bytes))
        });
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let target_server = self.config.bind_address();
        let server = server
            .bind(&target_server)
            .inspect_err(|e| error!("Failed to bind {}: {}", target_server, e))?
            .run();

        info!("Server running at http://{}", target_server);
        Ok(server)
    }
}
