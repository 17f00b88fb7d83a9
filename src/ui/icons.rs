pub struct Icons;

impl Icons {
    pub const ROOT: &str = "🏛️";
    pub const COMPONENT: &str = "📦";
    pub const KEY: &str = "🔑";
    pub const BINDING: &str = "🔗";
    pub const MEMBERS: &str = "💉";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const EMPTY: &str = "∅";
    pub const SEARCH: &str = "🔍";
}
