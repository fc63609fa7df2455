//! The line of candidates waiting to be evaluated
//!
//! People are stored by identity: `people[n]` is candidate `#n`. Entries are
//! never removed, only tombstoned, so ids held by the tray or by in-flight
//! tweens stay valid after a candidate leaves.

use log::debug;

use super::candidate::{Candidate, CandidateState};
use super::config::OfficeLayout;
use super::error::OfficeError;
use super::records::RecordSource;
use super::types::CandidateId;

#[derive(Debug, Clone, Default)]
pub struct CandidateQueue {
    people: Vec<Candidate>,
    /// Identity handed to the next placed candidate
    next_index: usize,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every visible candidate off screen, keeping their slots
    pub fn hide_all(&mut self) {
        for person in self.people.iter_mut().filter(|p| p.is_visible()) {
            person.state = CandidateState::Gone;
            person.in_spotlight = false;
        }
    }

    /// Place one candidate at horizontal position `x`, using the record at the
    /// current identity counter for its visual class.
    pub fn place_candidate(
        &mut self,
        x: f32,
        y: f32,
        records: &RecordSource,
    ) -> Result<CandidateId, OfficeError> {
        let record = records.get(self.next_index)?;
        let id = CandidateId(self.next_index);
        self.people.push(Candidate::new(id, record.color, x, y));
        self.next_index += 1;
        debug!("Placed candidate {} ({}) at x={:.2}", id, record.name, x);
        Ok(id)
    }

    /// Append `count` people to the line, one `x_offset` apart
    ///
    /// Either all of them are placed or, if the record source runs dry, none.
    pub fn add_people(
        &mut self,
        start_index: usize,
        count: usize,
        layout: &OfficeLayout,
        records: &RecordSource,
    ) -> Result<Vec<CandidateId>, OfficeError> {
        self.ensure_records(count, records)?;

        (start_index..start_index + count)
            .map(|i| {
                let order_in_line = i - start_index;
                self.place_candidate(layout.line_x(order_in_line), layout.person_start_y, records)
            })
            .collect()
    }

    /// Check that `count` more candidates can be placed from `records`
    pub fn ensure_records(
        &self,
        count: usize,
        records: &RecordSource,
    ) -> Result<(), OfficeError> {
        let available = records.len();
        match self.next_index.checked_add(count) {
            Some(needed) if needed <= available => Ok(()),
            Some(needed) => Err(OfficeError::RecordExhausted {
                index: needed - 1,
                available,
            }),
            None => Err(OfficeError::RecordExhausted {
                index: usize::MAX,
                available,
            }),
        }
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.people.get(id.0)
    }

    pub fn get_mut(&mut self, id: CandidateId) -> Option<&mut Candidate> {
        self.people.get_mut(id.0)
    }

    /// Every candidate still drawn on screen
    pub fn visible(&self) -> impl Iterator<Item = &Candidate> {
        self.people.iter().filter(|p| p.is_visible())
    }

    /// Candidates waiting in line, ordered by their slot
    pub fn in_line(&self) -> Vec<&Candidate> {
        let mut line: Vec<&Candidate> = self
            .people
            .iter()
            .filter(|p| p.state == CandidateState::InLine)
            .collect();
        line.sort_by(|a, b| a.line_x.total_cmp(&b.line_x));
        line
    }

    pub fn all(&self) -> &[Candidate] {
        &self.people
    }

    /// Number of arena slots ever used (including tombstones)
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }
}
