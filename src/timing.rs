use std::future::Future;
use std::time::Duration;

/// Run `op` but don't resolve before `floor` has passed
///
/// Both run concurrently. A success is held back until the timer also
/// fires; a failure comes back as soon as `op` produces it.
pub async fn at_least<F, T, E>(op: F, floor: Duration) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let timer = async {
        tokio::time::sleep(floor).await;
        Ok::<(), E>(())
    };

    let (value, ()) = tokio::try_join!(op, timer)?;
    Ok(value)
}
