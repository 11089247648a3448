use strum_macros::{Display, EnumIter};

/// Client-known classification of why a booking is cancelled. The set is
/// fixed; it is never fetched from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum CancellationReason {
    #[strum(serialize = "Customer Request")]
    CustomerRequest = 1,
    #[strum(serialize = "Restaurant Closure")]
    RestaurantClosure = 2,
    #[strum(serialize = "Weather")]
    Weather = 3,
    #[strum(serialize = "Emergency")]
    Emergency = 4,
    #[strum(serialize = "No Show")]
    NoShow = 5,
}

impl CancellationReason {
    /// Wire id sent as `cancellationReasonId`.
    pub fn id(self) -> u8 { self as u8 }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(CancellationReason::CustomerRequest),
            2 => Some(CancellationReason::RestaurantClosure),
            3 => Some(CancellationReason::Weather),
            4 => Some(CancellationReason::Emergency),
            5 => Some(CancellationReason::NoShow),
            _ => None,
        }
    }
}

impl Default for CancellationReason {
    fn default() -> Self { CancellationReason::CustomerRequest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_round_trip_for_the_whole_set() {
        for reason in CancellationReason::iter() {
            assert_eq!(CancellationReason::from_id(reason.id()), Some(reason));
        }
        assert_eq!(CancellationReason::from_id(0), None);
        assert_eq!(CancellationReason::from_id(6), None);
    }

    #[test]
    fn labels_match_the_fixed_enumeration() {
        assert_eq!(CancellationReason::CustomerRequest.to_string(), "Customer Request");
        assert_eq!(CancellationReason::NoShow.to_string(), "No Show");
        assert_eq!(CancellationReason::default().id(), 1);
    }
}
