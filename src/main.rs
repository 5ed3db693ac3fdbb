//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação: login público; o restante exige sessão
    let auth_publicas = Router::new().route("/login", post(handlers::auth::login));
    let auth_protegidas = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/switch-profile", post(handlers::auth::trocar_perfil))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let veiculos_routes = Router::new()
        .route(
            "/",
            get(handlers::veiculos::listar).post(handlers::veiculos::criar),
        )
        .route(
            "/{id}",
            get(handlers::veiculos::buscar)
                .put(handlers::veiculos::atualizar)
                .delete(handlers::veiculos::excluir),
        )
        .route("/import", post(handlers::veiculos::importar))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Tabelas de referência: marcas, modelos e cores
    let tabelas_routes = Router::new()
        .route(
            "/marcas",
            get(handlers::tabelas::listar_marcas).post(handlers::tabelas::criar_marca),
        )
        .route(
            "/marcas/{id}",
            get(handlers::tabelas::buscar_marca)
                .put(handlers::tabelas::atualizar_marca)
                .delete(handlers::tabelas::excluir_marca),
        )
        .route(
            "/modelos",
            get(handlers::tabelas::listar_modelos).post(handlers::tabelas::criar_modelo),
        )
        .route(
            "/modelos/{id}",
            get(handlers::tabelas::buscar_modelo)
                .put(handlers::tabelas::atualizar_modelo)
                .delete(handlers::tabelas::excluir_modelo),
        )
        .route("/modelos/import", post(handlers::tabelas::importar_modelos))
        .route(
            "/cores",
            get(handlers::tabelas::listar_cores).post(handlers::tabelas::criar_cor),
        )
        .route(
            "/cores/{id}",
            get(handlers::tabelas::buscar_cor)
                .put(handlers::tabelas::atualizar_cor)
                .delete(handlers::tabelas::excluir_cor),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let concessionarias_routes = Router::new()
        .route(
            "/",
            get(handlers::concessionarias::listar).post(handlers::concessionarias::criar),
        )
        .route(
            "/{id}",
            get(handlers::concessionarias::buscar)
                .put(handlers::concessionarias::atualizar)
                .delete(handlers::concessionarias::excluir),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let transportadoras_routes = Router::new()
        .route(
            "/",
            get(handlers::transportadoras::listar).post(handlers::transportadoras::criar),
        )
        .route(
            "/{id}",
            get(handlers::transportadoras::buscar)
                .put(handlers::transportadoras::atualizar)
                .delete(handlers::transportadoras::excluir),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Prefixo exclusivo do administrador (painel + usuários)
    let admin_routes = Router::new()
        .route("/metrics", get(handlers::admin::metricas))
        .route(
            "/users",
            get(handlers::admin::listar_usuarios).post(handlers::admin::criar_usuario),
        )
        .route(
            "/users/{id}",
            get(handlers::admin::buscar_usuario)
                .put(handlers::admin::atualizar_usuario)
                .delete(handlers::admin::excluir_usuario),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Autoatendimento da concessionária
    let dealership_routes = Router::new()
        .route(
            "/profile",
            get(handlers::concessionaria::perfil).put(handlers::concessionaria::atualizar_perfil),
        )
        .route("/metrics", get(handlers::concessionaria::metricas))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_publicas.merge(auth_protegidas))
        .nest("/api/vehicles", veiculos_routes)
        .nest("/api/tables", tabelas_routes)
        .nest("/api/concessionarias", concessionarias_routes)
        .nest("/api/transportadoras", transportadoras_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/dealership", dealership_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
