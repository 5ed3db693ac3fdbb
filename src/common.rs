pub mod error;
pub mod paginacao;
pub mod texto;
