use geocatalog_core::{
    ExtensionError, ExtensionKind, ExtensionRegistry, ExtensionResult, ParamMap, ParamValue,
    ProgressMonitor, ServiceError, ServiceExtension, ServiceHandle, ServiceLocator, ServiceResult,
};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of collaborator calls.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl CallLog {
    pub fn push(&self, entry: String) {
        self.0.lock().expect("call log lock").push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("call log lock").clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries().iter().any(|value| value == entry)
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|value| value.starts_with(prefix))
            .count()
    }
}

#[allow(dead_code)]
#[derive(Clone)]
pub enum Derive {
    Decline,
    Params(ParamMap),
    Fail,
    Panic,
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Build {
    Decline,
    Handle(&'static str),
    Fail,
    Panic,
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Release {
    Ok,
    Fail,
    Panic,
}

/// Extension whose answers are fixed up front.
#[allow(dead_code)]
pub struct ScriptedExtension {
    id: &'static str,
    kind: ExtensionKind,
    derive: Derive,
    build: Build,
    release: Release,
    log: CallLog,
}

#[allow(dead_code)]
impl ScriptedExtension {
    pub fn specific(id: &'static str, derive: Derive, build: Build, log: &CallLog) -> Self {
        Self {
            id,
            kind: ExtensionKind::Specific,
            derive,
            build,
            release: Release::Ok,
            log: log.clone(),
        }
    }

    pub fn generic(id: &'static str, derive: Derive, build: Build, log: &CallLog) -> Self {
        Self {
            kind: ExtensionKind::Generic,
            ..Self::specific(id, derive, build, log)
        }
    }

    pub fn with_release(mut self, release: Release) -> Self {
        self.release = release;
        self
    }
}

impl ServiceExtension for ScriptedExtension {
    fn extension_id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> ExtensionKind {
        self.kind
    }

    fn derive_params(&self, locator: &ServiceLocator) -> ExtensionResult<Option<ParamMap>> {
        self.log.push(format!("derive:{}", self.id));
        match &self.derive {
            Derive::Decline => Ok(None),
            Derive::Params(params) => Ok(Some(params.clone())),
            Derive::Fail => Err(ExtensionError::InvalidInput(format!(
                "{} does not understand {locator}",
                self.id
            ))),
            Derive::Panic => panic!("{} blew up deriving params", self.id),
        }
    }

    fn instantiate(&self, _params: &ParamMap) -> ExtensionResult<Option<Box<dyn ServiceHandle>>> {
        self.log.push(format!("instantiate:{}", self.id));
        match self.build {
            Build::Decline => Ok(None),
            Build::Handle(name) => Ok(Some(Box::new(MockHandle::new(
                name,
                self.release,
                &self.log,
            )))),
            Build::Fail => Err(ExtensionError::Unavailable(format!(
                "{} backend offline",
                self.id
            ))),
            Build::Panic => panic!("{} blew up instantiating", self.id),
        }
    }
}

/// Handle that records its disposal in the shared call log.
#[allow(dead_code)]
pub struct MockHandle {
    name: String,
    release: Release,
    log: CallLog,
}

#[allow(dead_code)]
impl MockHandle {
    pub fn new(name: &str, release: Release, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            release,
            log: log.clone(),
        }
    }
}

impl ServiceHandle for MockHandle {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn dispose(&mut self, monitor: &mut dyn ProgressMonitor) -> ServiceResult<()> {
        monitor.begin_task("close", 2);
        monitor.worked(1);
        match self.release {
            Release::Ok => {
                self.log.push(format!("dispose:{}", self.name));
                monitor.worked(1);
                monitor.done();
                Ok(())
            }
            Release::Fail => Err(ServiceError::Release(format!(
                "{} connection already closed",
                self.name
            ))),
            Release::Panic => panic!("{} blew up disposing", self.name),
        }
    }
}

#[allow(dead_code)]
pub fn params(key: &str, value: &str) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert(key.to_string(), ParamValue::from(value));
    params
}

#[allow(dead_code)]
pub fn registry(extensions: Vec<ScriptedExtension>) -> Arc<ExtensionRegistry> {
    let mut registry = ExtensionRegistry::new();
    for extension in extensions {
        registry
            .register(Arc::new(extension))
            .expect("scripted extension should register");
    }
    Arc::new(registry)
}

#[allow(dead_code)]
pub fn identifiers(services: &[Box<dyn ServiceHandle>]) -> Vec<String> {
    services
        .iter()
        .map(|service| service.identifier().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn locator(value: &str) -> ServiceLocator {
    ServiceLocator::parse(value).expect("valid locator")
}
