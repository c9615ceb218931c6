//! `SampleQueue`: samples waiting to be applied to a session.
//!
//! Under [`DeliveryPolicy::Queue`] every sample is applied in arrival order.
//! Under [`DeliveryPolicy::Coalesce`] a new location sample replaces any
//! location still pending, and likewise for headings, so a slow consumer
//! always works on the most recent reading of each kind.

use std::collections::VecDeque;

use crate::{Reading, SensorSample};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Apply every sample.
    #[default]
    Queue,
    /// Most recent wins.
    Coalesce,
}

#[derive(Debug, Default)]
pub struct SampleQueue {
    policy:    DeliveryPolicy,
    pending:   VecDeque<SensorSample>,
    coalesced: u64,
}

impl SampleQueue {
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self { policy, pending: VecDeque::new(), coalesced: 0 }
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    pub fn push(&mut self, sample: SensorSample) {
        if self.policy == DeliveryPolicy::Coalesce {
            let same_kind = |s: &SensorSample| {
                matches!(
                    (&s.reading, &sample.reading),
                    (Reading::Location(_), Reading::Location(_)) | (Reading::Heading(_), Reading::Heading(_))
                )
            };
            if let Some(slot) = self.pending.iter_mut().find(|s| same_kind(s)) {
                *slot = sample;
                self.coalesced += 1;
                return;
            }
        }
        self.pending.push_back(sample);
    }

    pub fn pop(&mut self) -> Option<SensorSample> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Samples dropped because a newer one of the same kind replaced them.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
