//! Shared test utilities and fixture generators

#![allow(dead_code)] // Not every test file uses every helper

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ez_homelab::config::{AdditionalStack, ConfigStore, DeploymentType, SelectedServices};
use ez_homelab::deploy::DeployPaths;

/// Deployment paths rooted inside a temp directory
pub fn temp_paths(temp: &TempDir) -> DeployPaths {
    DeployPaths {
        env_file: temp.path().join(".env"),
        stacks_dir: temp.path().join("stacks"),
        templates_dir: temp.path().join("docker-compose"),
    }
}

/// Create a template tree with a compose file per bundle
pub fn create_template_tree(templates_dir: &Path, bundles: &[&str]) {
    for bundle in bundles {
        let dir = templates_dir.join(bundle);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("docker-compose.yml"),
            format!("# compose file for {}\nservices: {{}}\n", bundle),
        )
        .unwrap();
        // Nested config directory to exercise recursive copy
        let conf_dir = dir.join("config");
        fs::create_dir_all(&conf_dir).unwrap();
        fs::write(conf_dir.join("settings.yml"), "key: value\n").unwrap();
    }
}

/// A fully configured store for a single-server deployment
pub fn single_server_store() -> ConfigStore {
    let mut store = ConfigStore::new();
    store.deployment_type = Some(DeploymentType::Single);
    store.set("DOMAIN", "testlab.duckdns.org");
    store.set("DEFAULT_USER", "admin");
    store.set("DEFAULT_PASSWORD", "hunter2");
    store.set("DEFAULT_EMAIL", "admin@testlab.duckdns.org");
    store.set("DUCKDNS_TOKEN", "abc123token");
    store.selected = SelectedServices::with_core();
    store.selected.infrastructure = vec!["Dockge".to_string(), "Portainer".to_string()];
    store.selected.dashboards = vec!["Homepage".to_string()];
    store.selected.additional = vec![AdditionalStack::Media, AdditionalStack::Monitoring];
    store
}

/// A settings file that passes validation
pub fn write_valid_env(path: &Path) {
    let secret = "f".repeat(128);
    let content = format!(
        "DOMAIN=testlab.duckdns.org\n\
         DUCKDNS_TOKEN=abc123token\n\
         PUID=1000\n\
         PGID=1000\n\
         TZ=America/New_York\n\
         DEPLOYMENT_TYPE=single\n\
         DEFAULT_USER=admin\n\
         DEFAULT_PASSWORD=hunter2\n\
         DEFAULT_EMAIL=admin@testlab.duckdns.org\n\
         AUTHELIA_JWT_SECRET={s}\n\
         AUTHELIA_SESSION_SECRET={s}\n\
         AUTHELIA_STORAGE_ENCRYPTION_KEY={s}\n",
        s = secret
    );
    fs::write(path, content).unwrap();
}

/// Write an executable stub standing in for the docker CLI.
///
/// The stub handles `--version`, `compose up`, `compose down`, and
/// `compose ps --format json`, and appends every invocation to
/// `invocations.log` next to itself.
pub fn write_docker_stub(dir: &Path, ps_services: &[&str], fail_up: bool) -> PathBuf {
    let log = dir.join("invocations.log");
    let ps_lines: String = ps_services
        .iter()
        .map(|s| format!("echo '{{\"Service\": \"{}\", \"State\": \"running\"}}'\n", s))
        .collect();
    let up_exit = if fail_up {
        "echo 'bind: address already in use' >&2\nexit 1\n"
    } else {
        "exit 0\n"
    };

    let script = format!(
        "#!/bin/sh\n\
         echo \"$@\" >> {log}\n\
         case \"$1\" in\n\
         --version)\n  echo 'Docker version 27.0.0'\n  exit 0\n  ;;\n\
         compose)\n\
           case \"$2\" in\n\
           up)\n  {up_exit}  ;;\n\
           down)\n  exit 0\n  ;;\n\
           ps)\n{ps_lines}  exit 0\n  ;;\n\
           esac\n  ;;\n\
         esac\n\
         exit 1\n",
        log = log.display(),
        up_exit = up_exit,
        ps_lines = ps_lines,
    );

    let path = dir.join("docker-stub");
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stub docker whose `compose up` fails only inside the named bundle
/// directory; everything else succeeds.
pub fn write_docker_stub_failing_in(dir: &Path, bundle: &str) -> PathBuf {
    let log = dir.join("invocations.log");
    let script = format!(
        "#!/bin/sh\n\
         echo \"$@\" >> {log}\n\
         case \"$1\" in\n\
         --version)\n  exit 0\n  ;;\n\
         compose)\n\
           if [ \"$2\" = up ] && [ \"$(basename \"$PWD\")\" = {bundle} ]; then\n\
             echo 'container exited with code 1' >&2\n\
             exit 1\n\
           fi\n\
           exit 0\n  ;;\n\
         esac\n\
         exit 1\n",
        log = log.display(),
        bundle = bundle,
    );

    let path = dir.join("docker-stub-partial");
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Read the stub's invocation log
pub fn read_stub_log(dir: &Path) -> String {
    fs::read_to_string(dir.join("invocations.log")).unwrap_or_default()
}
