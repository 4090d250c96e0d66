//! Environment version comparison against the fixture.

use super::common::FIXTURE;
use sphindex::envversion::VersionChange;
use sphindex::{check_env_version, EnvVersion, Staleness};

#[test]
fn test_fixture_is_current_for_sphinx3() {
    assert!(check_env_version(&FIXTURE.envversion, &EnvVersion::sphinx3()).is_current());
}

#[test]
fn test_bumped_domain_makes_index_stale() {
    let mut expected = EnvVersion::sphinx3();
    expected.insert("sphinx.domains.python", 4);

    let staleness = check_env_version(&FIXTURE.envversion, &expected);
    assert_eq!(
        staleness,
        Staleness::Stale {
            changed: vec![VersionChange {
                name: "sphinx.domains.python".into(),
                found: 3,
                expected: 4,
            }],
            missing: vec![],
            extra: vec![],
        }
    );
    assert!(staleness.to_string().contains("sphinx.domains.python 3 != 4"));
}

#[test]
fn test_extension_on_one_side_makes_index_stale() {
    let mut expected = EnvVersion::sphinx3();
    expected.insert("sphinx.ext.todo", 2);

    match check_env_version(&FIXTURE.envversion, &expected) {
        Staleness::Stale { missing, extra, .. } => {
            assert_eq!(missing, vec!["sphinx.ext.todo".to_string()]);
            assert!(extra.is_empty());
        }
        Staleness::Current => panic!("expected stale"),
    }

    match check_env_version(&expected, &FIXTURE.envversion) {
        Staleness::Stale { missing, extra, .. } => {
            assert!(missing.is_empty());
            assert_eq!(extra, vec!["sphinx.ext.todo".to_string()]);
        }
        Staleness::Current => panic!("expected stale"),
    }
}
