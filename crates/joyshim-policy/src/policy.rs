//! Device rules and first-match policy resolution.

use core::fmt;

use joyshim_errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound of a scale percentage.
pub const MAX_SCALE_PERCENT: u8 = 100;

/// Force feedback policy resolved for one device.
///
/// # Examples
///
/// ```
/// use joyshim_policy::ResolvedPolicy;
///
/// let policy = ResolvedPolicy::from_percent(150);
/// assert!(policy.enabled);
/// assert_eq!(policy.scale_percent, 100);
///
/// // Zero percent means blocked.
/// assert!(!ResolvedPolicy::from_percent(0).enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedPolicy {
    pub enabled: bool,
    pub scale_percent: u8,
}

impl Default for ResolvedPolicy {
    fn default() -> Self {
        Self::allow()
    }
}

impl ResolvedPolicy {
    /// Policy with `scale_percent` clamped to `[0, 100]`.
    pub fn new(enabled: bool, scale_percent: i64) -> Self {
        Self {
            enabled,
            scale_percent: clamp_percent(scale_percent),
        }
    }

    /// Full-strength pass-through.
    pub fn allow() -> Self {
        Self {
            enabled: true,
            scale_percent: MAX_SCALE_PERCENT,
        }
    }

    /// All force feedback blocked.
    pub fn block() -> Self {
        Self {
            enabled: false,
            scale_percent: 0,
        }
    }

    /// Percentage rule: enabled when positive, scale clamped to `[0, 100]`.
    pub fn from_percent(percent: i64) -> Self {
        Self::new(percent > 0, percent)
    }

    /// Whether forwarded effects are attenuated.
    pub fn is_scaled(&self) -> bool {
        self.enabled && self.scale_percent < MAX_SCALE_PERCENT
    }
}

impl fmt::Display for ResolvedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "allow ({}%)", self.scale_percent)
        } else {
            write!(f, "BLOCK")
        }
    }
}

fn clamp_percent(percent: i64) -> u8 {
    u8::try_from(percent.clamp(0, i64::from(MAX_SCALE_PERCENT))).unwrap_or(MAX_SCALE_PERCENT)
}

/// Ordered rule: devices whose name contains `pattern` get `policy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRule {
    pattern: String,
    pattern_lower: String,
    policy: ResolvedPolicy,
}

impl DeviceRule {
    pub fn new(pattern: impl Into<String>, policy: ResolvedPolicy) -> Self {
        let pattern = pattern.into();
        let pattern_lower = pattern.to_lowercase();
        Self {
            pattern,
            pattern_lower,
            policy,
        }
    }

    /// Parses a rule value: `block`, `allow` or an integer percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for any other value.
    pub fn parse(pattern: impl Into<String>, value: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let trimmed = value.trim();
        let policy = match trimmed.to_lowercase().as_str() {
            "block" => ResolvedPolicy::block(),
            "allow" => ResolvedPolicy::allow(),
            other => match other.parse::<i64>() {
                Ok(percent) => ResolvedPolicy::from_percent(percent),
                Err(_) => return Err(ConfigError::invalid_rule(pattern, trimmed)),
            },
        };
        Ok(Self::new(pattern, policy))
    }

    /// Pattern as written in the configuration.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn policy(&self) -> ResolvedPolicy {
        self.policy
    }

    /// Case-insensitive substring match against an already lower-cased name.
    fn matches_lower(&self, name_lower: &str) -> bool {
        name_lower.contains(&self.pattern_lower)
    }
}

/// Resolves device names to policies using ordered first-match rules.
///
/// The rule table is immutable after construction and needs no locking.
///
/// # Examples
///
/// ```
/// use joyshim_policy::{DeviceRule, PolicyResolver, ResolvedPolicy};
///
/// let resolver = PolicyResolver::new(
///     vec![
///         DeviceRule::new("MFG Crosswind", ResolvedPolicy::block()),
///         DeviceRule::new("Logitech", ResolvedPolicy::from_percent(50)),
///     ],
///     ResolvedPolicy::allow(),
/// );
///
/// assert_eq!(resolver.resolve("Logitech G940 Joystick"), ResolvedPolicy::from_percent(50));
/// assert_eq!(resolver.resolve("VKB Gunfighter"), ResolvedPolicy::allow());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyResolver {
    rules: Vec<DeviceRule>,
    default_policy: ResolvedPolicy,
}

impl PolicyResolver {
    pub fn new(rules: Vec<DeviceRule>, default_policy: ResolvedPolicy) -> Self {
        Self {
            rules,
            default_policy,
        }
    }

    /// Policy for `device_name`: the first matching rule, else the default.
    pub fn resolve(&self, device_name: &str) -> ResolvedPolicy {
        self.matching_rule(device_name)
            .map_or(self.default_policy, DeviceRule::policy)
    }

    /// First rule matching `device_name`, if any. Empty names match nothing.
    pub fn matching_rule(&self, device_name: &str) -> Option<&DeviceRule> {
        if device_name.is_empty() {
            return None;
        }
        let name_lower = device_name.to_lowercase();
        self.rules.iter().find(|rule| rule.matches_lower(&name_lower))
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[DeviceRule] {
        &self.rules
    }

    pub fn default_policy(&self) -> ResolvedPolicy {
        self.default_policy
    }
}
