pub mod auth;
pub mod importacao;
pub mod metricas_service;
pub mod tabelas_service;
pub mod usuario_service;
pub mod veiculo_service;
