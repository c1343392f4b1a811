//! Tipos de erro do cliente da API de RH.
//!
//! Define [`ApiError`] separando os três modos de falha do transporte:
//! erro de aplicação (resposta 200 com lista `errors`), erro HTTP e falha
//! de rede. Usa `thiserror` para derivar `Display` e `Error`.

use thiserror::Error;

/// Erros que podem ocorrer ao falar com a plataforma de RH.
///
/// A distinção importa para quem chama: uma falha de rede aborta a execução
/// inteira, enquanto um erro de aplicação é fatal apenas para a submissão
/// corrente.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A resposta veio bem formada (HTTP 200) mas carrega uma lista `errors`.
    /// A mensagem embute cada entrada com suas posições "row R, column C".
    #[error("application error: {message}")]
    Application { message: String },

    /// O servidor respondeu com status HTTP fora da faixa 2xx.
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Falha na camada de rede (DNS, conexão recusada, timeout).
    /// Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Resposta 2xx que não segue o contrato do envelope.
    #[error("malformed response: {0}")]
    Malformed(String),
}
