//! # 住所
//!
//! 申請対象サイトの住所エンティティ。通知メールでは 1 行の要約として
//! 表示されるため、要約ロジックもここに置く。

define_record_id! {
    /// 住所 ID（一意識別子）
    ///
    /// addresses テーブルの主キー。
    pub struct AddressId;
}

/// 住所エンティティ
///
/// すべての項目が任意。外部システム由来のデータには部分的にしか
/// 埋まっていない住所が存在する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    id:             AddressId,
    address_line_1: Option<String>,
    address_line_2: Option<String>,
    town:           Option<String>,
    county:         Option<String>,
    postcode:       Option<String>,
}

impl Address {
    /// データベースの行から住所を復元する
    pub fn from_db(
        id: AddressId,
        address_line_1: Option<String>,
        address_line_2: Option<String>,
        town: Option<String>,
        county: Option<String>,
        postcode: Option<String>,
    ) -> Self {
        Self {
            id,
            address_line_1,
            address_line_2,
            town,
            county,
            postcode,
        }
    }

    pub fn id(&self) -> AddressId {
        self.id
    }

    /// 住所を 1 行の要約文字列にする
    ///
    /// 値が入っている項目だけを `", "` で連結する。空白のみの項目は
    /// 欠損として扱う。すべて欠損の場合は空文字列を返す。
    pub fn summary(&self) -> String {
        [
            &self.address_line_1,
            &self.address_line_2,
            &self.town,
            &self.county,
            &self.postcode,
        ]
        .into_iter()
        .filter_map(|part| {
            part.as_deref()
                .map(str::trim)
                .filter(|trimmed| !trimmed.is_empty())
        })
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_address(
        line_1: Option<&str>,
        line_2: Option<&str>,
        town: Option<&str>,
        county: Option<&str>,
        postcode: Option<&str>,
    ) -> Address {
        Address::from_db(
            AddressId::new(1),
            line_1.map(String::from),
            line_2.map(String::from),
            town.map(String::from),
            county.map(String::from),
            postcode.map(String::from),
        )
    }

    #[test]
    fn 全項目が埋まっている住所を要約できる() {
        let address = make_address(
            Some("1 High Street"),
            Some("Westside"),
            Some("Taunton"),
            Some("Somerset"),
            Some("TA1 1AA"),
        );
        assert_eq!(
            address.summary(),
            "1 High Street, Westside, Taunton, Somerset, TA1 1AA"
        );
    }

    #[rstest]
    #[case(make_address(Some("1 High Street"), None, Some("Taunton"), None, Some("TA1 1AA")),
           "1 High Street, Taunton, TA1 1AA")]
    #[case(make_address(Some("  1 High Street "), Some("   "), None, None, None),
           "1 High Street")]
    #[case(make_address(None, None, None, None, None), "")]
    fn 欠損項目を飛ばして要約する(#[case] address: Address, #[case] expected: &str) {
        assert_eq!(address.summary(), expected);
    }
}
