pub mod auth;
pub mod error;
pub mod extract;
pub mod password;
pub mod pets;
pub mod routes;
pub mod session;

/// Run a synchronous database call on the blocking pool.
pub(crate) async fn blocking<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
