#![warn(missing_docs)]

//! Host engine integration for the tag compiler
//!
//! Installs the compiler into the host's raw-text preprocessing stage
//! exactly once per process. The host implements [`TemplatePipeline`] and
//! invokes the registered hook once per raw template source, passing a
//! fresh [`ComponentCatalog`] snapshot each time; the hook returns the
//! rewritten text for the host's directive parser.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use tagmill_compiler::{CompileError, ComponentCatalog, TagCompiler};

/// A raw-text preprocessing hook
///
/// Called by the host with one template source and the catalog snapshot for
/// that compile; returns the rewritten source.
pub type RawTextHook =
    Arc<dyn Fn(&str, &ComponentCatalog) -> Result<String, CompileError> + Send + Sync>;

/// The host's preprocessing registration point
pub trait TemplatePipeline {
    /// Register a hook to run over every raw template source
    fn register_raw_hook(&mut self, hook: RawTextHook);
}

/// Set when the hook has been installed; held for the process lifetime,
/// never reset.
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the tag compiler into the host pipeline
///
/// The first call registers the compile hook and returns `true`. Every
/// later call in the same process is a no-op returning `false`, so plugin
/// setup may run repeatedly without stacking hooks.
pub fn install(pipeline: &mut dyn TemplatePipeline) -> bool {
    if INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!("tag compiler hook already installed, skipping");
        return false;
    }

    let hook: RawTextHook = Arc::new(|raw: &str, catalog: &ComponentCatalog| {
        TagCompiler::new(catalog).compile(raw)
    });
    pipeline.register_raw_hook(hook);
    debug!("tag compiler hook installed");

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPipeline {
        hooks: Vec<RawTextHook>,
    }

    impl TemplatePipeline for RecordingPipeline {
        fn register_raw_hook(&mut self, hook: RawTextHook) {
            self.hooks.push(hook);
        }
    }

    // The installation flag is process-wide, so both branches are exercised
    // from a single test.
    #[test]
    fn test_install_registers_the_hook_once() {
        let mut pipeline = RecordingPipeline::default();

        assert!(install(&mut pipeline));
        assert!(!install(&mut pipeline));
        assert_eq!(pipeline.hooks.len(), 1);

        let catalog = ComponentCatalog::default();
        let compiled = (*pipeline.hooks[0])("<x-button />", &catalog).unwrap();
        assert_eq!(compiled, "\n@component(\"button\", {  })\n@end\n");
    }
}
