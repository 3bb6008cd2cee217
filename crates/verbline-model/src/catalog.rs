use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use verbline_utils::VerbError;

use crate::descriptor::VerbDescriptor;
use crate::hooks::{PostAction, RunOutcome};
use crate::instance::VerbInstance;

/// Registry of verb descriptors, keyed by verb name.
///
/// Registration order is preserved for listing and validation.
#[derive(Default)]
pub struct VerbCatalog {
    verbs: Vec<Arc<VerbDescriptor>>,
    post_actions: HashMap<String, Arc<dyn PostAction>>,
}

impl fmt::Debug for VerbCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbCatalog")
            .field("verbs", &self.names().collect::<Vec<_>>())
            .field("post_actions", &self.post_actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl VerbCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::DuplicateVerb`] if the name is already taken.
    pub fn register(
        &mut self,
        descriptor: VerbDescriptor,
    ) -> Result<Arc<VerbDescriptor>, VerbError> {
        if self.get(descriptor.name()).is_some() {
            return Err(VerbError::DuplicateVerb {
                name: descriptor.name().to_string(),
            });
        }
        debug!(
            verb = descriptor.name(),
            fields = descriptor.fields().len(),
            "registered verb"
        );
        let descriptor = Arc::new(descriptor);
        self.verbs.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Builder-style [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::DuplicateVerb`] if the name is already taken.
    pub fn with_verb(mut self, descriptor: VerbDescriptor) -> Result<Self, VerbError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<VerbDescriptor>> {
        self.verbs.iter().find(|d| d.name() == name)
    }

    /// # Errors
    ///
    /// Returns [`VerbError::UnknownVerb`] if no verb has this name.
    pub fn require(&self, name: &str) -> Result<&Arc<VerbDescriptor>, VerbError> {
        self.get(name).ok_or_else(|| VerbError::UnknownVerb {
            name: name.to_string(),
        })
    }

    pub fn descriptors(&self) -> &[Arc<VerbDescriptor>] {
        &self.verbs
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.verbs.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Create a fresh instance of the named verb.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::UnknownVerb`] if no verb has this name.
    pub fn instantiate(&self, name: &str) -> Result<VerbInstance, VerbError> {
        self.require(name).map(|d| VerbInstance::new(Arc::clone(d)))
    }

    /// Attach a post-action to a registered verb, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::UnknownVerb`] if no verb has this name.
    pub fn register_post_action(
        &mut self,
        verb: &str,
        action: impl PostAction + 'static,
    ) -> Result<(), VerbError> {
        self.require(verb)?;
        self.post_actions.insert(verb.to_string(), Arc::new(action));
        Ok(())
    }

    /// Run the post-action registered for the instance's verb.
    ///
    /// Returns `false` when the verb has no post-action.
    pub fn dispatch_post_action(&self, instance: &VerbInstance, outcome: &RunOutcome) -> bool {
        match self.post_actions.get(instance.verb()) {
            Some(action) => {
                debug!(
                    verb = instance.verb(),
                    exit_code = outcome.exit_code,
                    "running post-action"
                );
                action.after_run(instance, outcome);
                true
            }
            None => false,
        }
    }
}
