/*!
 * Target-language cleanup after restoration.
 *
 * Machine translation reliably mistranslates a handful of game mechanics
 * terms ("focus" as 焦点, "division" as 分裂). A fixed correction table maps
 * those back to the established terms, and two formatting rules normalize
 * military unit names and leading country tags.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Known mistranslations and their established corrections, applied in order
const CORRECTIONS: [(&str, &str); 16] = [
    ("俄罗斯", "苏联"),
    ("苏维埃", "苏联"),
    ("装甲的", "装甲"),
    ("分裂", "师"),
    ("焦点", "国策"),
    ("支持战争", "战争支持度"),
    ("战争支持", "战争支持度"),
    ("稳定性", "稳定度"),
    ("稳定", "稳定度"),
    ("战斗计划", "作战计划"),
    ("计划奖金", "计划加成"),
    ("刺穿", "穿甲"),
    ("空中霸权", "空中优势"),
    ("原子弹", "核弹"),
    ("反抗", "抵抗运动"),
    ("依从性", "顺从度"),
];

// @const: Ordinal suffix between a number and a unit name, e.g. "3rd 装甲师"
static UNIT_ORDINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)(?:st|nd|rd|th)?\s?(步兵师|装甲师|骑兵师|山地师|陆战队|伞兵师|摩托化师|机械化师)")
        .unwrap()
});

// @const: Bare country tag at the start of a value
static COUNTRY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{3})\s").unwrap()
});

/// Apply all cleanup rules to a restored value
pub fn apply(text: &str) -> String {
    let mut out = text.to_string();

    for (wrong, right) in CORRECTIONS {
        out = correct(&out, wrong, right);
    }

    out = UNIT_ORDINAL_REGEX.replace_all(&out, "${1}${2}").into_owned();
    out = COUNTRY_TAG_REGEX.replace(&out, "${1}: ").into_owned();

    out
}

/// Replace `wrong` with `right`, leaving already-correct occurrences alone.
///
/// When `right` contains `wrong` (e.g. 稳定 inside 稳定度), a plain replace
/// would corrupt text that is already correct, so existing occurrences of
/// `right` are shielded first.
fn correct(text: &str, wrong: &str, right: &str) -> String {
    if !text.contains(wrong) {
        return text.to_string();
    }

    if right.contains(wrong) {
        const SHIELD: char = '\u{1}';
        return text
            .replace(right, &SHIELD.to_string())
            .replace(wrong, right)
            .replace(SHIELD, right);
    }

    text.replace(wrong, right)
}
