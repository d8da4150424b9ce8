//! Shared OpenDAL stream plumbing used by every backend adapter.

use futures::StreamExt;
use opendal::{ErrorKind, Operator};

use super::error::StorageError;
use super::operator::ByteStream;

/// Drains `stream` into the object at `key`.
///
/// On any failure the in-flight write is aborted so no partial object is
/// published; if the final close itself fails, the key is best-effort
/// deleted before the error is returned.
pub(crate) async fn write_stream(
    op: &Operator,
    key: &str,
    mut stream: ByteStream,
) -> Result<(), StorageError> {
    let mut writer = op.writer(key).await?;

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(err) => {
                abandon(writer, op, key).await;
                return Err(StorageError::transport(format!(
                    "upload stream interrupted: {err}"
                )));
            }
        };

        if let Err(err) = writer.write(bytes).await {
            abandon(writer, op, key).await;
            return Err(err.into());
        }
    }

    if let Err(err) = writer.close().await {
        // A failed close can still have materialized the object on some
        // transports; remove it so a failure never leaves bytes behind.
        let _ = op.delete(key).await;
        return Err(err.into());
    }

    Ok(())
}

/// Aborts an in-flight write and best-effort removes whatever the
/// transport may already have materialized at `key`. Not every service
/// supports abort, so the delete backstops it.
async fn abandon(mut writer: opendal::Writer, op: &Operator, key: &str) {
    let _ = writer.abort().await;
    let _ = op.delete(key).await;
}

/// Opens a lazily-read stream over the object at `key`.
pub(crate) async fn read_stream(op: &Operator, key: &str) -> Result<ByteStream, StorageError> {
    let reader = op.reader(key).await.map_err(|err| not_found_as_key(err, key))?;
    let stream = reader
        .into_bytes_stream(..)
        .await
        .map_err(|err| not_found_as_key(err, key))?;

    Ok(Box::pin(stream))
}

/// Deletes the object at `key`, treating an already-missing object as
/// success.
pub(crate) async fn delete_object(op: &Operator, key: &str) -> Result<(), StorageError> {
    match op.delete(key).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn not_found_as_key(err: opendal::Error, key: &str) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::not_found(key)
    } else {
        err.into()
    }
}
