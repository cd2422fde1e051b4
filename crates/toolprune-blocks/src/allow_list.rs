//! The set of tool names whose blocks are preserved

use std::collections::HashSet;

/// Tools kept by default: batch operations plus search/get/list tools for
/// the core CRM objects. Products, emails, communications, calls and
/// engagement tools are not listed and get filtered.
pub const DEFAULT_TOOLS: &[&str] = &[
    // Batch - associations
    "crm_batch_create_associations",
    // Batch - companies
    "crm_batch_create_companies",
    "crm_batch_update_companies",
    // Batch - contacts
    "crm_batch_create_contacts",
    "crm_batch_update_contacts",
    // Batch - deals
    "crm_batch_create_deals",
    "crm_batch_update_deals",
    // Batch - leads
    "crm_batch_create_leads",
    "crm_batch_update_leads",
    // Batch - objects
    "crm_batch_create_objects",
    "crm_batch_read_objects",
    "crm_batch_update_objects",
    // Batch - meetings
    "meetings_batch_archive",
    "meetings_batch_create",
    "meetings_batch_update",
    // Batch - notes
    "notes_batch_archive",
    "notes_batch_create",
    "notes_batch_read",
    "notes_batch_update",
    // Batch - tasks
    "tasks_batch_archive",
    "tasks_batch_create",
    "tasks_batch_read",
    "tasks_batch_update",
    // Search/get/list - companies
    "crm_get_company",
    "crm_search_companies",
    "crm_get_company_properties",
    // Search/get/list - objects
    "crm_list_objects",
    "crm_get_object",
    "crm_search_objects",
    // Search/get/list - associations
    "crm_list_association_types",
    "crm_get_associations",
    // Search/get/list - contacts
    "crm_get_contact",
    "crm_search_contacts",
    "crm_get_contact_properties",
    // Search/get/list - leads
    "crm_get_lead",
    "crm_search_leads",
    "crm_get_lead_properties",
    // Search/get/list - deals
    "crm_get_deal",
    "crm_search_deals",
    "crm_get_deal_properties",
    // Search/get/list - meetings
    "meetings_list",
    "meetings_get",
    "meetings_search",
    // Search/get/list - notes
    "notes_get",
    "notes_list",
    "notes_search",
    // Search/get/list - tasks
    "tasks_get",
    "tasks_list",
    "tasks_search",
];

/// An unordered set of tool names, tested for membership only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: HashSet<String>,
}

impl AllowList {
    /// Build an allow-list from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in list, see [`DEFAULT_TOOLS`].
    pub fn builtin() -> Self {
        Self::new(DEFAULT_TOOLS.iter().copied())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names on the list that do not appear in `seen`, sorted.
    ///
    /// Listing a name that no block carries is allowed; this is only used
    /// to report such names.
    pub fn unmatched<'a, I>(&self, seen: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let seen: HashSet<&str> = seen.into_iter().collect();
        let mut unmatched: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| !seen.contains(*name))
            .collect();
        unmatched.sort_unstable();
        unmatched
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
