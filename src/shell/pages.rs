//! Placeholder pages reachable from the main view.
//!
//! Every page is static text. None of them fetch data or perform any
//! cryptographic work.

#[cfg(test)]
#[path = "pages_test.rs"]
mod pages_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    KeyManagement,
    EncryptionDecryption,
    AutomationOrchestration,
    QkdSimulationIntegration,
    ThreatIntelligenceAnalytics,
    UserRoleManagement,
    SystemConfiguration,
    AgentManagement,
    PolicyConfiguration,
    EventMonitoring,
    KmsIntegration,
    PqcResearch,
}

/// Side-panel menu, in display order.
pub const NAVIGATION: [Page; 8] = [
    Page::Dashboard,
    Page::KeyManagement,
    Page::EncryptionDecryption,
    Page::AutomationOrchestration,
    Page::QkdSimulationIntegration,
    Page::ThreatIntelligenceAnalytics,
    Page::UserRoleManagement,
    Page::SystemConfiguration,
];

impl Page {
    pub const ALL: [Page; 13] = [
        Page::Dashboard,
        Page::KeyManagement,
        Page::EncryptionDecryption,
        Page::AutomationOrchestration,
        Page::QkdSimulationIntegration,
        Page::ThreatIntelligenceAnalytics,
        Page::UserRoleManagement,
        Page::SystemConfiguration,
        Page::AgentManagement,
        Page::PolicyConfiguration,
        Page::EventMonitoring,
        Page::KmsIntegration,
        Page::PqcResearch,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::KeyManagement => "/key-management",
            Self::EncryptionDecryption => "/encryption-decryption",
            Self::AutomationOrchestration => "/automation-orchestration",
            Self::QkdSimulationIntegration => "/qkd-simulation-integration",
            Self::ThreatIntelligenceAnalytics => "/threat-intelligence-analytics",
            Self::UserRoleManagement => "/user-role-management",
            Self::SystemConfiguration => "/system-configuration",
            Self::AgentManagement => "/agent-management",
            Self::PolicyConfiguration => "/policy-configuration",
            Self::EventMonitoring => "/event-monitoring",
            Self::KmsIntegration => "/kms-integration",
            Self::PqcResearch => "/pqc-research",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::KeyManagement => "Key Management",
            Self::EncryptionDecryption => "Encryption/Decryption",
            Self::AutomationOrchestration => "Automation & Orchestration",
            Self::QkdSimulationIntegration => "QKD Simulation & Integration",
            Self::ThreatIntelligenceAnalytics => "Threat Intelligence & Analytics",
            Self::UserRoleManagement => "User & Role Management",
            Self::SystemConfiguration => "System Configuration",
            Self::AgentManagement => "Agent Management",
            Self::PolicyConfiguration => "Policy Configuration",
            Self::EventMonitoring => "Event Monitoring",
            Self::KmsIntegration => "KMS Integration",
            Self::PqcResearch => "PQC Research",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Dashboard => {
                "System Status: Operational. Active encryption sessions, key management alerts, \
                 and communication logs are summarized here."
            }
            Self::KeyManagement => {
                "This section will allow users to generate, store, distribute, and revoke quantum and classical keys."
            }
            Self::EncryptionDecryption => {
                "This section will provide an interface for initiating and monitoring secure communication sessions."
            }
            Self::AutomationOrchestration => {
                "This section will allow visual workflow building for automated security policies \
                 and self-healing mechanisms."
            }
            Self::QkdSimulationIntegration => {
                "This section will provide tools to configure and visualize QKD simulations \
                 and integrate with real-world QKD networks."
            }
            Self::ThreatIntelligenceAnalytics => {
                "This section will visualize threat landscapes, analyze security events, and generate reports."
            }
            Self::UserRoleManagement => {
                "This section will provide a robust access control system to define user roles, \
                 permissions, and multi-factor authentication settings."
            }
            Self::SystemConfiguration => {
                "This section will provide an intuitive interface for configuring various system parameters, \
                 network settings, and integration points."
            }
            Self::AgentManagement => "This section will allow you to manage agents.",
            Self::PolicyConfiguration => "This section will allow you to configure policies.",
            Self::EventMonitoring => "This section will allow you to monitor events.",
            Self::KmsIntegration => "This section will allow you to integrate with Key Management Systems.",
            Self::PqcResearch => "This section will display information about Post-Quantum Cryptography research.",
        }
    }

    /// Resolve a route path. `/` is the dashboard; a missing leading slash
    /// and a trailing slash are tolerated.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Self::Dashboard);
        }
        let normalized = if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }
}
