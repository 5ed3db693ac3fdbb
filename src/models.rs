pub mod auth;
pub mod concessionaria;
pub mod metricas;
pub mod tabelas;
pub mod transportadora;
pub mod veiculo;
