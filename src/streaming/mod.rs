use std::pin::Pin;

use futures::Stream;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::core::error::{CapabilityError, HostError};
use crate::core::traits::{NativeReader, NativeSequence, NativeStream};
use crate::core::types::{GenerationChunk, GenerationInput};
use crate::session::Session;
use crate::shapes;

pub type ChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<GenerationChunk, CapabilityError>> + Send + 'a>>;

/// Streams one generation call on `session`.
///
/// Readiness, capability and exclusivity are checked up front; the native
/// stream itself is opened on first poll. Increments are yielded exactly as
/// the host produced them. A host failure ends the stream with
/// [`CapabilityError::Generation`] carrying the text already yielded.
///
/// Dropping the returned stream is the cancellation signal: the native
/// stream is released exactly once on every exit path, and the session
/// accepts a new generation afterwards.
pub fn stream_generate(
    session: &Session,
    input: GenerationInput,
) -> Result<ChunkStream<'_>, CapabilityError> {
    session.ensure_ready()?;

    let capability = session.capability();
    let shape = session.shape();
    if input.capability() != capability {
        return Err(CapabilityError::OperationUnsupported {
            capability,
            operation: input.operation().to_string(),
        });
    }

    let guard = session.acquire()?;
    let call = shapes::translator_for(shape).encode_call(&input);
    debug!(?capability, ?shape, method = %call.method, "starting generation");

    Ok(Box::pin(async_stream::stream! {
        let _guard = guard;

        let native = match session.native().open_stream(call) {
            Ok(native) => native,
            Err(host) => {
                warn!(?capability, ?shape, error = %host, "native generation call rejected");
                yield Err(CapabilityError::Generation {
                    capability,
                    shape,
                    partial: String::new(),
                    host,
                });
                return;
            }
        };

        let mut lease = StreamLease::new(native);
        let mut partial = String::new();
        let mut index = 0;
        loop {
            match lease.next().await {
                Ok(Some(text)) => {
                    partial.push_str(&text);
                    yield Ok(GenerationChunk { index, text });
                    index += 1;
                }
                Ok(None) => break,
                Err(host) => {
                    warn!(?capability, ?shape, error = %host, delivered = index, "generation stream failed");
                    lease.release();
                    yield Err(CapabilityError::Generation {
                        capability,
                        shape,
                        partial,
                        host,
                    });
                    return;
                }
            }
        }

        lease.release();
        debug!(?capability, ?shape, chunks = index, "generation finished");
    }))
}

enum LeasedStream {
    Sequence(Box<dyn NativeSequence>),
    Reader(Box<dyn NativeReader>),
    Single(Option<BoxFuture<'static, Result<String, HostError>>>),
}

/// Scoped ownership of a native stream; releases it once, at the latest on drop.
struct StreamLease {
    stream: LeasedStream,
    released: bool,
}

impl StreamLease {
    fn new(native: NativeStream) -> Self {
        let stream = match native {
            NativeStream::Sequence(sequence) => LeasedStream::Sequence(sequence),
            NativeStream::Reader(reader) => LeasedStream::Reader(reader),
            NativeStream::Single(result) => LeasedStream::Single(Some(result)),
        };
        Self {
            stream,
            released: false,
        }
    }

    async fn next(&mut self) -> Result<Option<String>, HostError> {
        if self.released {
            return Ok(None);
        }

        match &mut self.stream {
            LeasedStream::Sequence(sequence) => sequence.next().await.transpose(),
            LeasedStream::Reader(reader) => reader.read().await,
            // An empty one-shot result yields no chunk.
            LeasedStream::Single(pending) => match pending.take() {
                Some(result) => result.await.map(|text| Some(text).filter(|text| !text.is_empty())),
                None => Ok(None),
            },
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match &mut self.stream {
            LeasedStream::Sequence(sequence) => sequence.close(),
            LeasedStream::Reader(reader) => reader.release(),
            LeasedStream::Single(pending) => {
                pending.take();
            }
        }
    }
}

impl Drop for StreamLease {
    fn drop(&mut self) {
        self.release();
    }
}
