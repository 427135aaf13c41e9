use crate::promo::Promotion;
use crate::source::{PromotionSource, SourceError};
use log::{debug, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use time::Date;

/// Sequence number identifying one submitted query.  Later submissions get
/// larger tickets.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Ticket(pub(crate) u64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Query {
    /// Every promotion, for computing calendar coverage
    All,
    /// Promotions running on the given date, for the list
    ActiveOn(Date),
}

#[derive(Debug)]
pub(crate) struct Reply {
    pub(crate) ticket: Ticket,
    pub(crate) query: Query,
    pub(crate) result: Result<Vec<Promotion>, SourceError>,
}

/// Runs each query on its own worker thread so that the UI never blocks.
/// Queries are never cancelled; consumers use tickets to ignore replies
/// that have been superseded.
#[derive(Debug)]
pub(crate) struct Fetcher {
    source: Arc<dyn PromotionSource>,
    sender: Sender<Reply>,
    receiver: Receiver<Reply>,
    issued: u64,
}

impl Fetcher {
    pub(crate) fn new(source: Arc<dyn PromotionSource>) -> Fetcher {
        let (sender, receiver) = channel();
        Fetcher {
            source,
            sender,
            receiver,
            issued: 0,
        }
    }

    pub(crate) fn submit(&mut self, query: Query) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        debug!("Submitting {query:?} as {ticket:?}");
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = match query {
                Query::All => source.fetch_all(),
                Query::ActiveOn(date) => source.fetch_active_on(date),
            };
            // The receiver only goes away when the app is shutting down
            let _ = sender.send(Reply {
                ticket,
                query,
                result,
            });
        });
        ticket
    }

    /// Returns the next reply that has arrived, if any, without blocking
    pub(crate) fn try_recv(&self) -> Option<Reply> {
        self.receiver.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Reply> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

/// The state of data that is fetched asynchronously
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Loadable<T> {
    /// Nothing has been requested yet
    #[default]
    Idle,
    Loading(Ticket),
    Ready(T),
    Failed,
}

impl<T> Loadable<T> {
    pub(crate) fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Loadable::Idle | Loadable::Loading(_))
    }

    /// Applies the outcome of the query identified by `ticket`.  Returns
    /// `false` and leaves the state untouched if that query is not the one
    /// currently awaited.
    pub(crate) fn resolve<E>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        if !matches!(self, Loadable::Loading(t) if *t == ticket) {
            debug!("Discarding stale reply {ticket:?}");
            return false;
        }
        *self = match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => {
                warn!("Query {ticket:?} failed: {:#}", anyhow::Error::new(e));
                Loadable::Failed
            }
        };
        true
    }
}
