//! Observer hook for controller notifications
//!
//! Rejected add-row requests are silent no-ops for the table itself; an
//! observer is the channel through which an application can surface them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::row::RowId;

/// Why an add-row request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRowRejection {
    /// `enableAddRow` is false
    Disabled,
    /// An untouched draft row is already being edited
    DraftPending(RowId),
}

impl fmt::Display for AddRowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "adding rows is disabled"),
            Self::DraftPending(id) => write!(f, "row {id} is still an empty draft"),
        }
    }
}

/// Receives controller notifications. All methods default to no-ops.
pub trait TableObserver {
    /// A row was appended
    fn row_added(&mut self, _id: RowId) {}

    /// An add-row request was ignored
    fn add_row_rejected(&mut self, _reason: AddRowRejection) {}

    /// An untouched draft lost edit mode and was dropped
    fn row_discarded(&mut self, _id: RowId) {}

    /// A row was removed on request
    fn row_removed(&mut self, _id: RowId) {}

    /// The editing row changed
    fn edit_mode_changed(&mut self, _previous: Option<RowId>, _current: Option<RowId>) {}
}

/// Notification captured by [`RecordingObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverEvent {
    /// See [`TableObserver::row_added`]
    RowAdded(RowId),
    /// See [`TableObserver::add_row_rejected`]
    AddRowRejected(AddRowRejection),
    /// See [`TableObserver::row_discarded`]
    RowDiscarded(RowId),
    /// See [`TableObserver::row_removed`]
    RowRemoved(RowId),
    /// See [`TableObserver::edit_mode_changed`]
    EditModeChanged {
        /// Row that left edit mode
        previous: Option<RowId>,
        /// Row that entered edit mode
        current: Option<RowId>,
    },
}

/// Observer that keeps every notification in a shared log.
///
/// Clones share the same log, so one clone can be handed to the controller
/// while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the recorded events
    #[must_use]
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.borrow().clone()
    }

    /// Recorded add-row rejections
    #[must_use]
    pub fn rejections(&self) -> Vec<AddRowRejection> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::AddRowRejected(reason) => Some(*reason),
                _ => None,
            })
            .collect()
    }

    /// Drops recorded events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: ObserverEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TableObserver for RecordingObserver {
    fn row_added(&mut self, id: RowId) {
        self.push(ObserverEvent::RowAdded(id));
    }

    fn add_row_rejected(&mut self, reason: AddRowRejection) {
        self.push(ObserverEvent::AddRowRejected(reason));
    }

    fn row_discarded(&mut self, id: RowId) {
        self.push(ObserverEvent::RowDiscarded(id));
    }

    fn row_removed(&mut self, id: RowId) {
        self.push(ObserverEvent::RowRemoved(id));
    }

    fn edit_mode_changed(&mut self, previous: Option<RowId>, current: Option<RowId>) {
        self.push(ObserverEvent::EditModeChanged { previous, current });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_shares_log() {
        let recorder = RecordingObserver::new();
        let mut handle = recorder.clone();
        handle.row_added(RowId::from_raw(1));
        handle.add_row_rejected(AddRowRejection::Disabled);
        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.rejections(), vec![AddRowRejection::Disabled]);
    }

    #[test]
    fn test_recording_observer_clear() {
        let recorder = RecordingObserver::new();
        let mut handle = recorder.clone();
        handle.row_removed(RowId::from_raw(2));
        recorder.clear();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(AddRowRejection::Disabled.to_string(), "adding rows is disabled");
        assert_eq!(
            AddRowRejection::DraftPending(RowId::from_raw(3)).to_string(),
            "row 3 is still an empty draft"
        );
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl TableObserver for Silent {}
        let mut silent = Silent;
        silent.row_discarded(RowId::from_raw(0));
        silent.edit_mode_changed(None, Some(RowId::from_raw(0)));
    }
}
