//! Known credential kinds and where each one may live.

use serde::Serialize;

/// Where a credential may be exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exposure {
    /// Public by design; may be bundled into frontend code.
    Public,
    /// May be bundled, but only with provider-side restrictions.
    Restricted,
    /// Must never reach the client bundle.
    ServerOnly,
}

impl Exposure {
    pub fn location(self) -> &'static str {
        match self {
            Exposure::Public => "SAFE with a public prefix",
            Exposure::Restricted => "public prefix + domain restrictions",
            Exposure::ServerOnly => "NO public prefix (server .env only)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    SupabaseAnon,
    SupabaseServiceRole,
    StripePublishable,
    StripeSecret,
    GoogleMaps,
    JwtSecret,
}

impl SecretKind {
    pub const ALL: [SecretKind; 6] = [
        SecretKind::SupabaseAnon,
        SecretKind::SupabaseServiceRole,
        SecretKind::StripePublishable,
        SecretKind::StripeSecret,
        SecretKind::GoogleMaps,
        SecretKind::JwtSecret,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SecretKind::SupabaseAnon => "Supabase Anon Key",
            SecretKind::SupabaseServiceRole => "Supabase Service Role Key",
            SecretKind::StripePublishable => "Stripe Public Key",
            SecretKind::StripeSecret => "Stripe Secret Key",
            SecretKind::GoogleMaps => "Google Maps API Key",
            SecretKind::JwtSecret => "JWT Signing Secret",
        }
    }

    pub fn exposure(self) -> Exposure {
        match self {
            SecretKind::SupabaseAnon | SecretKind::StripePublishable => Exposure::Public,
            SecretKind::GoogleMaps => Exposure::Restricted,
            SecretKind::SupabaseServiceRole | SecretKind::StripeSecret | SecretKind::JwtSecret => {
                Exposure::ServerOnly
            }
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            SecretKind::SupabaseAnon => {
                "Public by design. Bundle it with a public prefix; RLS policies protect the data."
            }
            SecretKind::SupabaseServiceRole => {
                "Bypasses all RLS! Keep it in the server .env file only."
            }
            SecretKind::StripePublishable => {
                "Starts with pk_. Can only create payment intents, not charge."
            }
            SecretKind::StripeSecret => "Starts with sk_. Can charge cards! Keep it server-only.",
            SecretKind::GoogleMaps => {
                "May be bundled, but must be restricted to your domain in the Google console."
            }
            SecretKind::JwtSecret => {
                "Signs auth tokens. If leaked, anyone can forge users! Server .env only."
            }
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            SecretKind::SupabaseAnon => "VITE_SUPABASE_ANON_KEY=eyJh...VCJ9",
            SecretKind::SupabaseServiceRole => "SUPABASE_SERVICE_ROLE_KEY=eyJh...VCJ9",
            SecretKind::StripePublishable => "VITE_STRIPE_PUBLIC_KEY=pk_test_51H...",
            SecretKind::StripeSecret => "STRIPE_SECRET_KEY=sk_test_51H...",
            SecretKind::GoogleMaps => "VITE_GOOGLE_MAPS_KEY=AIza...WK",
            SecretKind::JwtSecret => "JWT_SECRET=your-256-bit...",
        }
    }
}

/// Detection rules, most specific first: `(kind, name pattern, value pattern)`.
/// A variable matches a rule when either pattern matches.
pub(super) const RULES: &[(SecretKind, &str, Option<&str>)] = &[
    (SecretKind::SupabaseServiceRole, r"(?i)SUPABASE_SERVICE_ROLE", None),
    (SecretKind::SupabaseAnon, r"(?i)SUPABASE_ANON", None),
    (
        SecretKind::StripeSecret,
        r"(?i)STRIPE_SECRET",
        Some(r"^(sk|rk)_(test|live)_[0-9A-Za-z]+"),
    ),
    (
        SecretKind::StripePublishable,
        r"(?i)STRIPE_(PUBLIC|PUBLISHABLE)",
        Some(r"^pk_(test|live)_[0-9A-Za-z]+"),
    ),
    (
        SecretKind::GoogleMaps,
        r"(?i)GOOGLE_MAPS",
        Some(r"^AIza[0-9A-Za-z_-]{20,}$"),
    ),
    (SecretKind::JwtSecret, r"(?i)JWT_(SECRET|SIGNING)", None),
];
