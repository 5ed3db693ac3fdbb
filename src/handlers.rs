pub mod admin;
pub mod auth;
pub mod concessionaria;
pub mod concessionarias;
pub mod tabelas;
pub mod transportadoras;
pub mod veiculos;
