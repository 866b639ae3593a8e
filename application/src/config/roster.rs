//! Council roster: the departments and their executives.

use council_domain::WORKERS_PER_DEPARTMENT;

/// The executive who represents a department in the macro council
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutiveProfile {
    /// Speaker label in the transcript, e.g. `"CFO"`
    pub label: String,
    /// Role text handed to the model; defaults to the label
    pub role: String,
}

impl ExecutiveProfile {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            role: label.clone(),
            label,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentProfile {
    pub name: String,
    pub goal: String,
    pub executive: ExecutiveProfile,
    /// One role label per worker
    pub worker_roles: Vec<String>,
}

impl DepartmentProfile {
    pub fn new(
        name: impl Into<String>,
        goal: impl Into<String>,
        executive: ExecutiveProfile,
    ) -> Self {
        let name = name.into();
        let worker_roles = (1..=WORKERS_PER_DEPARTMENT)
            .map(|i| format!("{} Analyst {}", name, i))
            .collect();
        Self {
            name,
            goal: goal.into(),
            executive,
            worker_roles,
        }
    }

    pub fn with_worker_roles(mut self, roles: Vec<String>) -> Self {
        self.worker_roles = roles;
        self
    }
}

/// Ordered departments; the order is also the speaking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilRoster {
    departments: Vec<DepartmentProfile>,
}

impl Default for CouncilRoster {
    /// Finance (CFO), Growth (CMO) and Tech (CTO)
    fn default() -> Self {
        Self::new(vec![
            DepartmentProfile::new("Finance", "Maximize ROI", ExecutiveProfile::new("CFO")),
            DepartmentProfile::new(
                "Growth",
                "Maximize User Base",
                ExecutiveProfile::new("CMO"),
            ),
            DepartmentProfile::new("Tech", "System Stability", ExecutiveProfile::new("CTO")),
        ])
    }
}

impl CouncilRoster {
    pub fn new(departments: Vec<DepartmentProfile>) -> Self {
        Self { departments }
    }

    pub fn departments(&self) -> &[DepartmentProfile] {
        &self.departments
    }

    pub fn executive_labels(&self) -> Vec<&str> {
        self.departments
            .iter()
            .map(|d| d.executive.label.as_str())
            .collect()
    }
}
