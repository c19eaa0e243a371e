use crate::model::location::{LocationProvider, LocationSample};
use crate::model::session::{AccuracyTier, AlertLevel, ProviderTier, TrustVerdict};

const HIGH_ACCURACY_METERS: f64 = 20.0;
const MEDIUM_ACCURACY_METERS: f64 = 100.0;

pub fn provider_tier(provider: LocationProvider) -> ProviderTier {
    match provider {
        LocationProvider::Gps | LocationProvider::Fused => ProviderTier::Trusted,
        LocationProvider::Network | LocationProvider::Wifi | LocationProvider::LastKnown => {
            ProviderTier::Degraded
        }
        LocationProvider::Unknown => ProviderTier::Unknown,
    }
}

/// Negative or non-finite radii are malformed and read as unknown.
pub fn accuracy_tier(accuracy_meters: Option<f64>) -> AccuracyTier {
    match accuracy_meters {
        Some(m) if !m.is_finite() || m < 0.0 => AccuracyTier::Unknown,
        Some(m) if m <= HIGH_ACCURACY_METERS => AccuracyTier::High,
        Some(m) if m <= MEDIUM_ACCURACY_METERS => AccuracyTier::Medium,
        Some(_) => AccuracyTier::Low,
        None => AccuracyTier::Unknown,
    }
}

/// `Some` only when both the distance and the radius are usable numbers.
pub fn within_geofence(distance_meters: Option<f64>, radius_meters: Option<f64>) -> Option<bool> {
    let distance = distance_meters.filter(|d| d.is_finite())?;
    let radius = radius_meters.filter(|r| r.is_finite())?;
    Some(distance <= radius)
}

fn alert_level(
    provider: ProviderTier,
    accuracy: AccuracyTier,
    mocked: bool,
    within: Option<bool>,
) -> AlertLevel {
    if mocked {
        return AlertLevel::Critical;
    }
    if within == Some(false) {
        return AlertLevel::Warning;
    }
    let weak_provider = provider != ProviderTier::Trusted;
    let weak_accuracy = matches!(accuracy, AccuracyTier::Low | AccuracyTier::Unknown);
    if weak_provider || weak_accuracy {
        AlertLevel::Caution
    } else {
        AlertLevel::Normal
    }
}

/// Trust verdict for a checkpoint's location fix.
///
/// A mocked fix is always surfaced as `Critical`, regardless of how good the
/// provider and accuracy look. A missing sample has no opinion on anything.
pub fn classify_location(
    sample: Option<&LocationSample>,
    geofence_radius: Option<f64>,
) -> TrustVerdict {
    let Some(sample) = sample else {
        return TrustVerdict {
            provider_tier: ProviderTier::Unknown,
            accuracy_tier: AccuracyTier::Unknown,
            mocked: false,
            within_geofence: None,
            alert: AlertLevel::Caution,
        };
    };

    let provider = provider_tier(sample.provider);
    let accuracy = accuracy_tier(sample.accuracy_meters);
    let within = within_geofence(sample.distance_from_office_meters, geofence_radius);

    TrustVerdict {
        provider_tier: provider,
        accuracy_tier: accuracy,
        mocked: sample.is_mocked,
        within_geofence: within,
        alert: alert_level(provider, accuracy, sample.is_mocked, within),
    }
}
