//! Frontier, candidate list and courtesy rate gate
//!
//! This module handles:
//! - FIFO frontier queue management (breadth-first order) with a length cap
//! - The visited set, marked before any fetch is attempted
//! - The de-duplicated, bounded candidate list
//! - Spacing requests by the courtesy delay

use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A URL queued for fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: String,

    /// Link distance from the start URL
    pub depth: u32,
}

/// Breadth-first frontier with its visited set
///
/// The queue refuses new entries once it holds `capacity` URLs. Entries are
/// handed out in the order they were enqueued.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    capacity: usize,
}

impl Frontier {
    /// Creates a frontier seeded with the start URL at depth 0
    pub fn new(start_url: impl Into<String>, capacity: usize) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: start_url.into(),
            depth: 0,
        });

        Self {
            queue,
            visited: HashSet::new(),
            capacity,
        }
    }

    /// Removes the earliest-enqueued entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Enqueues a URL unless it was already visited or the queue is full
    ///
    /// Returns true if the URL was enqueued.
    pub fn push(&mut self, url: impl Into<String>, depth: u32) -> bool {
        let url = url.into();
        if self.visited.contains(&url) || self.queue.len() >= self.capacity {
            return false;
        }

        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Marks a URL as visited
    ///
    /// Returns false if it had already been visited.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// Ordered, de-duplicated list of candidate URLs with a hard length limit
#[derive(Debug)]
pub struct CandidateList {
    urls: Vec<String>,
    seen: HashSet<String>,
    limit: usize,
}

impl CandidateList {
    /// Creates an empty list holding at most `limit` URLs
    pub fn new(limit: usize) -> Self {
        Self {
            urls: Vec::new(),
            seen: HashSet::new(),
            limit,
        }
    }

    /// Appends a URL if it is new and the list has room
    ///
    /// Returns true if the URL was added.
    pub fn push(&mut self, url: &str) -> bool {
        if self.is_full() || self.seen.contains(url) {
            return false;
        }

        self.seen.insert(url.to_string());
        self.urls.push(url.to_string());
        true
    }

    /// Returns true if the URL is already a candidate
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Returns true once the limit is reached
    pub fn is_full(&self) -> bool {
        self.urls.len() >= self.limit
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if there are no candidates
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Consumes the list, returning candidates in first-seen order
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Spaces requests at least `interval` apart across all callers
///
/// Each caller reserves the next free slot under a lock and then sleeps until
/// that slot outside the lock, so concurrent callers queue up one interval
/// apart instead of firing together.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Creates a gate with the given minimum spacing
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Waits for this caller's slot
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next_slot = Some(slot + self.interval);
            slot
        };

        tokio::time::sleep_until(slot).await;
    }
}
