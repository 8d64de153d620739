use crate::ast;
use crate::operation::Operation;
use crate::operation::OperationKey;
use crate::operation::OperationKind;
use crate::operation::OperationResult;
use crate::schema::SchemaIndex;
use crate::selection::SelectionsByType;
use crate::PopulateOptions;
use crate::PopulateRewriter;
use crate::SelectionExtractor;
use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;

/// Stream stage that learns from completed queries and subscriptions and
/// populates `@populate` markers in mutations before forwarding them.
///
/// Every mutating entry point takes `&mut self`, which makes the exchange the
/// single writer of its [`SelectionsByType`]. To drive one exchange from
/// several threads, put it behind a `Mutex`.
///
/// Results arrive either through [`receive_result`](Self::receive_result) or
/// through the side channel handed out by
/// [`results_sender`](Self::results_sender). Channel results are applied
/// before the next operation is forwarded, or on demand through
/// [`drain_results`](Self::drain_results).
///
/// A query is remembered until its first result arrives and a subscription
/// until it is torn down. A query that will never get a result must be torn
/// down too, or its entry is kept for the lifetime of the exchange.
#[derive(Debug)]
pub struct PopulateExchange {
    in_flight: HashMap<OperationKey, Operation>,
    options: PopulateOptions,
    results_rx: mpsc::Receiver<OperationResult>,
    results_tx: mpsc::Sender<OperationResult>,
    schema: Arc<SchemaIndex>,
    selections: SelectionsByType,
}
impl PopulateExchange {
    pub fn new(schema: Arc<SchemaIndex>) -> Self {
        Self::with_selections(schema, SelectionsByType::new())
    }

    /// Builds an exchange that continues from an existing store of
    /// selections.
    pub fn with_selections(schema: Arc<SchemaIndex>, selections: SelectionsByType) -> Self {
        let (results_tx, results_rx) = mpsc::channel();
        Self {
            in_flight: HashMap::new(),
            options: PopulateOptions::default(),
            results_rx,
            results_tx,
            schema,
            selections,
        }
    }

    pub fn with_options(mut self, options: PopulateOptions) -> Self {
        self.options = options;
        self
    }

    /// Passes one operation through the exchange.
    ///
    /// Queries and subscriptions are forwarded untouched and remembered until
    /// their results arrive. Mutations are forwarded with their markers
    /// populated. Teardowns forget the operation they refer to.
    pub fn forward(&mut self, operation: Operation) -> Operation {
        let num_results = self.drain_results();
        if num_results > 0 {
            log::trace!("Applied {num_results} queued results.");
        }

        match operation.kind() {
            OperationKind::Query | OperationKind::Subscription => {
                self.in_flight.insert(operation.key(), operation.clone());
                operation
            },

            OperationKind::Mutation => {
                let rewriter = PopulateRewriter::new(
                    self.schema.as_ref(),
                    &self.selections,
                    &self.options,
                );
                if !rewriter.contains_marker(operation.document()) {
                    return operation;
                }

                log::debug!("Populating mutation {}.", operation.key());
                let document = rewriter.rewrite(operation.document());
                operation.with_document(document)
            },

            OperationKind::Teardown => {
                if self.in_flight.remove(&operation.key()).is_some() {
                    log::trace!("Tore down operation {}.", operation.key());
                }
                operation
            },
        }
    }

    /// Learns from a completed result if it belongs to an in-flight query or
    /// subscription and carries data. Query entries are retired after their
    /// first result; subscription entries stay until torn down.
    pub fn receive_result(&mut self, result: OperationResult) {
        let Some(operation) = self.in_flight.get(&result.key) else {
            log::trace!("Ignoring result for unknown operation {}.", result.key);
            return;
        };

        let retire = operation.kind() == OperationKind::Query;
        if result.has_data() {
            let observed = SelectionExtractor::new(self.schema.as_ref())
                .extract(operation.document());
            log::debug!(
                "Learned selections for {} types from operation {}.",
                observed.len(),
                result.key,
            );
            self.selections.merge_all(observed);
        } else {
            log::debug!("Result for operation {} carried no data.", result.key);
        }

        if retire {
            self.in_flight.remove(&result.key);
        }
    }

    /// Learns directly from a document, bypassing the result side channel.
    pub fn learn(&mut self, document: &ast::operation::Document) {
        let observed = SelectionExtractor::new(self.schema.as_ref()).extract(document);
        self.selections.merge_all(observed);
    }

    pub fn options(&self) -> &PopulateOptions {
        &self.options
    }

    pub fn results_sender(&self) -> mpsc::Sender<OperationResult> {
        self.results_tx.clone()
    }

    pub fn schema(&self) -> &Arc<SchemaIndex> {
        &self.schema
    }

    /// What has been learned so far. Results still queued on the side channel
    /// are not reflected until [`drain_results`](Self::drain_results) runs.
    pub fn selections(&self) -> &SelectionsByType {
        &self.selections
    }

    /// Lazily forwards every operation of `upstream`, in order.
    pub fn transform<I>(&mut self, upstream: I) -> PopulateStream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Operation>,
    {
        PopulateStream {
            exchange: self,
            upstream: upstream.into_iter(),
        }
    }

    /// Applies every result queued on the side channel. Returns how many
    /// results were taken off the channel.
    pub fn drain_results(&mut self) -> usize {
        let mut num_results = 0;
        while let Ok(result) = self.results_rx.try_recv() {
            self.receive_result(result);
            num_results += 1;
        }
        num_results
    }

    /// Number of queries and subscriptions still waiting for results.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }
}

/// Iterator returned by [`PopulateExchange::transform`].
#[derive(Debug)]
pub struct PopulateStream<'a, I> {
    exchange: &'a mut PopulateExchange,
    upstream: I,
}
impl<I: Iterator<Item = Operation>> Iterator for PopulateStream<'_, I> {
    type Item = Operation;

    fn next(&mut self) -> Option<Operation> {
        let operation = self.upstream.next()?;
        Some(self.exchange.forward(operation))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}
