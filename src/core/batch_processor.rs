//! Batch processing with order-preserving partitioning
//!
//! This module provides the `BatchProcessor` struct, which encodes a batch of
//! payment requests in parallel while keeping the results in input order.
//!
//! # Design
//!
//! Requests are independent value objects and the encoder is stateless, so a
//! batch can be split anywhere. The processor cuts it into contiguous chunks,
//! encodes each chunk on its own tokio task and joins the tasks in spawn order,
//! which gives back the input order without any sorting.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<PayloadEncoder>  (shared, stateless encoder)
//!     └── chunk_count          (number of tasks per batch)
//! ```

use std::sync::Arc;

use tracing::error;

use super::PayloadEncoder;
use crate::types::{EncodedPayload, PaymentRequest, QrError, RequestId};

/// Result of encoding a single request
#[derive(Debug, Clone)]
pub struct EncodingResult {
    /// Id of the request that was encoded
    pub request_id: RequestId,

    /// The encoded payload, or why encoding failed
    pub result: Result<EncodedPayload, QrError>,
}

/// Batch processor with order-preserving partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared encoder
    encoder: Arc<PayloadEncoder>,

    /// Number of chunks (and tasks) a batch is split into
    chunk_count: usize,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `encoder` - Arc-wrapped PayloadEncoder shared by all tasks
    /// * `chunk_count` - Number of tasks per batch; 0 is treated as 1
    pub fn new(encoder: Arc<PayloadEncoder>, chunk_count: usize) -> Self {
        Self {
            encoder,
            chunk_count: chunk_count.max(1),
        }
    }

    /// Split a batch into at most `chunk_count` contiguous chunks
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one chunk
    /// - Concatenating the chunks gives back the original batch
    /// - No chunk is empty
    pub fn partition(&self, batch: Vec<PaymentRequest>) -> Vec<Vec<PaymentRequest>> {
        if batch.is_empty() {
            return Vec::new();
        }

        let chunk_size = batch.len().div_ceil(self.chunk_count);
        let mut chunks = Vec::with_capacity(self.chunk_count);
        let mut remaining = batch.into_iter().peekable();

        while remaining.peek().is_some() {
            chunks.push(remaining.by_ref().take(chunk_size).collect());
        }

        chunks
    }

    /// Encode one chunk sequentially
    ///
    /// Every request is encoded even if some fail; results are in input order.
    pub fn encode_chunk(&self, requests: Vec<PaymentRequest>) -> Vec<EncodingResult> {
        requests
            .into_iter()
            .map(|request| {
                let request_id = request.id.clone();
                let result = self.encoder.encode(request);
                EncodingResult { request_id, result }
            })
            .collect()
    }

    /// Encode a batch in parallel
    ///
    /// # Guarantees
    ///
    /// - Chunks are encoded concurrently on spawned tasks
    /// - Results are returned in the same order as the input batch
    /// - Errors are captured in results and don't stop processing
    pub async fn process_batch(&self, batch: Vec<PaymentRequest>) -> Vec<EncodingResult> {
        let mut tasks = Vec::new();
        for chunk in self.partition(batch) {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move { processor.encode_chunk(chunk) }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(e) => error!("Encoding task panicked: {:?}", e),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdditionalData, Merchant, PaymentTarget};
    use rstest::rstest;

    fn request(id: usize) -> PaymentRequest {
        PaymentRequest {
            id: format!("req-{}", id),
            amount: None,
            target: PaymentTarget::VnPay {
                merchant: Merchant {
                    id: format!("{:010}", id),
                    name: "SHOP".to_string(),
                },
            },
            additional_data: AdditionalData::default(),
        }
    }

    fn requests(count: usize) -> Vec<PaymentRequest> {
        (0..count).map(request).collect()
    }

    fn processor(chunk_count: usize) -> BatchProcessor {
        BatchProcessor::new(Arc::new(PayloadEncoder::default()), chunk_count)
    }

    #[rstest]
    #[case::empty(0, 4, 0)]
    #[case::fewer_requests_than_chunks(3, 8, 3)]
    #[case::even_split(8, 4, 4)]
    #[case::uneven_split(10, 4, 4)]
    #[case::single_chunk(10, 1, 1)]
    #[case::zero_chunk_count(5, 0, 1)]
    fn test_partition_chunk_count(
        #[case] count: usize,
        #[case] chunk_count: usize,
        #[case] expected_chunks: usize,
    ) {
        let chunks = processor(chunk_count).partition(requests(count));
        assert_eq!(chunks.len(), expected_chunks);
        assert!(chunks.iter().all(|chunk| !chunk.is_empty()));
    }

    #[test]
    fn test_partition_preserves_order() {
        let chunks = processor(3).partition(requests(10));
        let flattened: Vec<PaymentRequest> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, requests(10));
    }

    #[test]
    fn test_encode_chunk_continues_after_error() {
        let mut batch = requests(3);
        if let PaymentTarget::VnPay { merchant } = &mut batch[1].target {
            merchant.name = "N".repeat(120);
        }

        let results = processor(1).encode_chunk(batch);
        assert_eq!(results.len(), 3);
        assert!(results[0].result.is_ok());
        assert!(matches!(
            results[1].result,
            Err(QrError::FieldTooLarge { .. })
        ));
        assert!(results[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_process_batch_empty() {
        let results = processor(4).process_batch(Vec::new()).await;
        assert!(results.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_preserves_order() {
        let results = processor(4).process_batch(requests(101)).await;

        let ids: Vec<String> = results.iter().map(|r| r.request_id.clone()).collect();
        let expected: Vec<String> = (0..101).map(|id| format!("req-{}", id)).collect();
        assert_eq!(ids, expected);
        assert!(results.iter().all(|r| r.result.is_ok()));
    }

    #[tokio::test]
    async fn test_process_batch_matches_sequential_encoding() {
        let parallel = processor(4).process_batch(requests(20)).await;
        let sequential = processor(1).encode_chunk(requests(20));

        let parallel: Vec<_> = parallel.into_iter().map(|r| r.result).collect();
        let sequential: Vec<_> = sequential.into_iter().map(|r| r.result).collect();
        assert_eq!(parallel, sequential);
    }
}
