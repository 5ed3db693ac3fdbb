pub mod concessionaria_repo;
pub use concessionaria_repo::ConcessionariaRepository;
pub mod metricas_repo;
pub use metricas_repo::MetricasRepository;
pub mod tabelas_repo;
pub use tabelas_repo::TabelasRepository;
pub mod transportadora_repo;
pub use transportadora_repo::TransportadoraRepository;
pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod veiculo_repo;
pub use veiculo_repo::VeiculoRepository;
