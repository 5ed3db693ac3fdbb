// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ConcessionariaRepository, MetricasRepository, TabelasRepository,
        TransportadoraRepository, UsuarioRepository, VeiculoRepository,
    },
    services::{
        auth::AuthService, importacao::ImportacaoService, metricas_service::MetricasService,
        tabelas_service::TabelasService, usuario_service::UsuarioService,
        veiculo_service::VeiculoService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
// Nada de singletons globais: o grafo inteiro nasce aqui e o ciclo de
// vida pertence ao main.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub veiculo_service: VeiculoService,
    pub tabelas_service: TabelasService,
    pub metricas_service: MetricasService,
    pub usuario_service: UsuarioService,
    pub importacao_service: ImportacaoService,
    pub concessionaria_repo: ConcessionariaRepository,
    pub transportadora_repo: TransportadoraRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let veiculo_repo = VeiculoRepository::new(db_pool.clone());
        let tabelas_repo = TabelasRepository::new(db_pool.clone());
        let metricas_repo = MetricasRepository::new(db_pool.clone());
        let concessionaria_repo = ConcessionariaRepository::new(db_pool.clone());
        let transportadora_repo = TransportadoraRepository::new(db_pool.clone());

        let auth_service = AuthService::new(usuario_repo.clone(), jwt_secret);
        let veiculo_service = VeiculoService::new(veiculo_repo.clone());
        let tabelas_service =
            TabelasService::new(tabelas_repo, veiculo_repo, db_pool.clone());
        let metricas_service = MetricasService::new(metricas_repo);
        let usuario_service = UsuarioService::new(usuario_repo);
        let importacao_service =
            ImportacaoService::new(tabelas_service.clone(), veiculo_service.clone());

        Ok(Self {
            db_pool,
            auth_service,
            veiculo_service,
            tabelas_service,
            metricas_service,
            usuario_service,
            importacao_service,
            concessionaria_repo,
            transportadora_repo,
        })
    }
}
