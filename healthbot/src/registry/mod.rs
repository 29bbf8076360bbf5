//! 監視対象レジストリ
//!
//! 起動時に一度だけ読み込まれる静的な監視対象リスト。
//! リスト内の順序がレポートの行順になる。

use crate::common::error::{CommonError, CommonResult};
use crate::common::types::Target;
use std::path::Path;
use std::sync::Arc;

/// 組み込みのデフォルト監視対象リストを返す
fn default_targets() -> Vec<Target> {
    vec![
        Target::new("https://100090.pythonanywhere.com/", "Test"),
        Target::new("https://100085.pythonanywhere.com/", "Email"),
        Target::new("https://100105.pythonanywhere.com/", "Credit System"),
        Target::new("https://www.qrcode.uxlivinglab.online/", "Fridge"),
        Target::new("https://www.scales.uxlivinglab.online/api/", "Scale"),
        Target::new("https://www.scales.uxlivinglab.online/services/", "Scale"),
        Target::new("https://www.uxlive.me/samanta-campaigns/", "Samanta Campaign"),
        Target::new(
            "https://www.dowelldatacube.uxlivinglab.online/db_api/health_check/",
            "Datacube API V1",
        ),
        Target::new("https://100045.pythonanywhere.com/", "Secure Repository"),
        Target::new("https://100009.pythonanywhere.com/", "DoWell Clock"),
        Target::new("https://100080.pythonanywhere.com/", "Legalzard"),
        Target::new("https://100098.pythonanywhere.com/", "Team Management"),
        Target::new("https://100074.pythonanywhere.com/health-check/", "Dowell Location"),
        Target::new("https://liveuxstoryboard.com/health-check", "Logo Scan"),
        Target::new("https://datacube.uxlivinglab.online/health_check/", "Datacube V2"),
        Target::new("https://www.dowellcube.uxlivinglab.online/api/v1/self", "DoWell Cube"),
    ]
}

/// 監視対象レジストリ
///
/// 不変リストをArcで共有するため、クローンは安価。
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Arc<Vec<Target>>,
}

impl TargetRegistry {
    /// 組み込みのデフォルトリストでレジストリを作成
    pub fn with_defaults() -> Self {
        Self {
            targets: Arc::new(default_targets()),
        }
    }

    /// 任意のリストからレジストリを作成（検証あり）
    pub fn from_targets(targets: Vec<Target>) -> CommonResult<Self> {
        for (index, target) in targets.iter().enumerate() {
            if target.url.trim().is_empty() {
                return Err(CommonError::Validation(format!(
                    "target {} has an empty url",
                    index
                )));
            }
            if target.name.trim().is_empty() {
                return Err(CommonError::Validation(format!(
                    "target {} has an empty name",
                    index
                )));
            }
        }
        Ok(Self {
            targets: Arc::new(targets),
        })
    }

    /// JSONファイル（`[{url, name}]`の配列）からレジストリを読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let targets: Vec<Target> = serde_json::from_str(&raw)?;
        Self::from_targets(targets)
    }

    /// 登録順の監視対象スライス
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// 監視対象数
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// 監視対象が空か
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_registry() {
        let registry = TargetRegistry::with_defaults();
        assert_eq!(registry.len(), 16);
        assert!(!registry.is_empty());
        // 先頭と末尾で登録順が保たれていること
        assert_eq!(registry.targets()[0].name, "Test");
        assert_eq!(registry.targets()[15].name, "DoWell Cube");
    }

    #[test]
    fn test_from_targets_preserves_order() {
        let registry = TargetRegistry::from_targets(vec![
            Target::new("https://b.test", "B"),
            Target::new("https://a.test", "A"),
        ])
        .unwrap();

        assert_eq!(registry.targets()[0].name, "B");
        assert_eq!(registry.targets()[1].name, "A");
    }

    #[test]
    fn test_from_targets_empty_list_allowed() {
        let registry = TargetRegistry::from_targets(Vec::new()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_targets_rejects_empty_url() {
        let result = TargetRegistry::from_targets(vec![Target::new("", "A")]);
        assert!(matches!(result, Err(CommonError::Validation(_))));
    }

    #[test]
    fn test_from_targets_rejects_empty_name() {
        let result = TargetRegistry::from_targets(vec![Target::new("https://a.test", "  ")]);
        assert!(matches!(result, Err(CommonError::Validation(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"url": "https://a.test/", "name": "A"}},
                {{"url": "https://b.test/", "product": "B"}}
            ]"#
        )
        .unwrap();

        let registry = TargetRegistry::from_json_file(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.targets()[0].name, "A");
        // 旧フィールド名 "product" も受け付ける
        assert_eq!(registry.targets()[1].name, "B");
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = TargetRegistry::from_json_file("/nonexistent/targets.json");
        assert!(matches!(result, Err(CommonError::Io(_))));
    }

    #[test]
    fn test_from_json_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = TargetRegistry::from_json_file(file.path());
        assert!(matches!(result, Err(CommonError::Serialization(_))));
    }
}
