use super::Executor;
use crate::decode::value::{parse_bool, parse_u64};
use crate::model::DiskConfig;
use crate::{InventoryError, Result};
use std::collections::HashMap;

const LSBLK: &str = "lsblk";
const LSBLK_ARGS: &[&str] = &[
    "--bytes",
    "--nodeps",
    "--pairs",
    "--output",
    "NAME,SIZE,ROTA,RO,TYPE,SERIAL",
];

/// Enumerate whole disks on this machine.
pub async fn discover_disks(executor: &dyn Executor) -> Result<Vec<DiskConfig>> {
    let output = executor.execute_command_with_output(LSBLK, LSBLK_ARGS).await?;

    let mut disks = Vec::new();
    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        let props = parse_key_value_pairs(line);

        let disk_type = props.get("TYPE").cloned().unwrap_or_default();
        if disk_type != "disk" {
            tracing::debug!("skipping block device of type {:?}: {}", disk_type, line);
            continue;
        }

        let name = props
            .get("NAME")
            .filter(|name| !name.is_empty())
            .cloned()
            .ok_or_else(|| InventoryError::Probe(format!("lsblk row without NAME: {}", line)))?;

        let field = |column: &str| -> (String, String) {
            (
                format!("{}:{}", name, column),
                props.get(column).cloned().unwrap_or_default(),
            )
        };

        let (key, raw) = field("SIZE");
        let size = parse_u64(&key, &raw)?;
        let (key, raw) = field("ROTA");
        let rotational = parse_bool(&key, &raw)?;
        let (key, raw) = field("RO");
        let readonly = parse_bool(&key, &raw)?;

        disks.push(DiskConfig {
            name: name.clone(),
            size,
            rotational,
            readonly,
            disk_type,
            serial: props.get("SERIAL").cloned().unwrap_or_default(),
        });
    }

    tracing::info!("Discovered {} disks", disks.len());
    Ok(disks)
}

/// Parse `KEY="value" OTHER="two words" BARE=x` into a map. Quotes are
/// stripped; malformed fragments without `=` are ignored.
pub fn parse_key_value_pairs(raw: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    let mut chars = raw.chars().peekable();

    loop {
        while chars.next_if(|ch| ch.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(ch) = chars.next_if(|ch| *ch != '=' && !ch.is_whitespace()) {
            key.push(ch);
        }

        if chars.next_if_eq(&'=').is_none() {
            continue;
        }

        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                value.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| !ch.is_whitespace()) {
                value.push(ch);
            }
        }

        if !key.is_empty() {
            props.insert(key, value);
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ScriptedExecutor {
        output: String,
    }

    #[async_trait]
    impl Executor for ScriptedExecutor {
        async fn execute_command_with_output(
            &self,
            command: &str,
            args: &[&str],
        ) -> Result<String> {
            assert_eq!(command, "lsblk");
            assert!(args.contains(&"--pairs"));
            Ok(self.output.clone())
        }
    }

    #[test]
    fn test_parse_key_value_pairs() {
        let props =
            parse_key_value_pairs(r#"foo="0" bar="1" baz="biz" model="WDC WD40" bare=x junk"#);
        assert_eq!(props.get("foo").map(String::as_str), Some("0"));
        assert_eq!(props.get("bar").map(String::as_str), Some("1"));
        assert_eq!(props.get("baz").map(String::as_str), Some("biz"));
        assert_eq!(props.get("model").map(String::as_str), Some("WDC WD40"));
        assert_eq!(props.get("bare").map(String::as_str), Some("x"));
        assert!(!props.contains_key("junk"));
        assert!(parse_key_value_pairs("   ").is_empty());
    }

    #[tokio::test]
    async fn test_discover_disks_keeps_whole_disks() {
        let executor = ScriptedExecutor {
            output: [
                r#"NAME="sda" SIZE="500107862016" ROTA="1" RO="0" TYPE="disk" SERIAL="WD-WCC4""#,
                r#"NAME="sr0" SIZE="1073741312" ROTA="1" RO="0" TYPE="rom" SERIAL="""#,
                r#"NAME="nvme0n1" SIZE="1000204886016" ROTA="0" RO="1" TYPE="disk" SERIAL="""#,
                "",
            ]
            .join("\n"),
        };

        let disks = discover_disks(&executor).await.unwrap();
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].name, "sda");
        assert_eq!(disks[0].size, 500107862016);
        assert!(disks[0].rotational);
        assert!(!disks[0].readonly);
        assert_eq!(disks[0].serial, "WD-WCC4");
        assert_eq!(disks[1].name, "nvme0n1");
        assert!(disks[1].readonly);
        assert_eq!(disks[1].serial, "");
    }

    #[tokio::test]
    async fn test_discover_disks_rejects_bad_size() {
        let executor = ScriptedExecutor {
            output: r#"NAME="sda" SIZE="big" ROTA="1" RO="0" TYPE="disk" SERIAL="""#.to_string(),
        };

        let err = discover_disks(&executor).await.unwrap_err();
        assert!(matches!(err, InventoryError::MalformedField { key, .. } if key == "sda:SIZE"));
    }
}
