// ==========================================
// 客车弹簧故障管理系统 - 报告版面计算
// ==========================================
// 职责: 页面几何常量、列宽分配、文本净化与折行估算
// 红线: 检查清单表列宽填满固定总宽;弹簧列数按 max(1, n) 除,
//       避免空配置除零
// ==========================================

/// A4 横向页面 (mm)
pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// 四边页边距 (mm)
pub const MARGIN_MM: f64 = 12.0;

/// 检查清单表固定总宽与两端固定列宽 (mm)
pub const CHECKLIST_TOTAL_WIDTH_MM: f64 = 260.0;
pub const ACTIVITY_COL_WIDTH_MM: f64 = 80.0;
pub const REMARKS_COL_WIDTH_MM: f64 = 40.0;

/// 字号 (pt)
pub const TITLE_FONT_SIZE: f64 = 16.0;
pub const HEADING_FONT_SIZE: f64 = 11.0;
pub const BODY_FONT_SIZE: f64 = 8.0;
pub const SIGNATURE_FONT_SIZE: f64 = 9.0;

/// 签名图片槽尺寸 (mm)
pub const SIGNATURE_IMAGE_WIDTH_MM: f64 = 45.0;
pub const SIGNATURE_IMAGE_HEIGHT_MM: f64 = 20.0;

/// pt → mm 换算
pub const PT_TO_MM: f64 = 0.352_778;

/// Helvetica 平均字符宽度估算系数 (em)
///
/// 折行估算用的保守均值;宁可偏宽导致提前折行,
/// 也不允许文本越过列边界。
const AVG_CHAR_WIDTH_EM: f64 = 0.52;

/// 单元格左右内边距 (mm)
pub const CELL_PADDING_MM: f64 = 1.2;

/// 单元格上下内边距 (mm)
pub const CELL_V_PADDING_MM: f64 = 1.0;

// ==========================================
// 颜色 (RGB 0..1)
// ==========================================
// 与既有报告版式对齐的固定配色
pub const COLOR_INFO_BG: (f64, f64, f64) = rgb_hex(0xf1, 0xf8, 0xe9);
pub const COLOR_CONFIG_HEADER: (f64, f64, f64) = rgb_hex(0x19, 0x76, 0xd2);
pub const COLOR_DEFECT_HEADER: (f64, f64, f64) = rgb_hex(0xc6, 0x28, 0x28);
pub const COLOR_VISUAL_HEADER: (f64, f64, f64) = rgb_hex(0x2e, 0x7d, 0x32);
pub const COLOR_MUSTDO_HEADER: (f64, f64, f64) = rgb_hex(0x15, 0x65, 0xc0);
pub const COLOR_GRID: (f64, f64, f64) = (0.5, 0.5, 0.5);
pub const COLOR_BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);
pub const COLOR_WHITE: (f64, f64, f64) = (1.0, 1.0, 1.0);

const fn rgb_hex(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

// ==========================================
// 列宽分配
// ==========================================

/// 检查清单表列宽: Activity + 每个弹簧部位一列 + Remarks
///
/// Activity 与 Remarks 固定宽,剩余宽度在弹簧列之间均分。
/// position_count 为 0 时按 1 列除,避免除零。
pub fn checklist_column_widths(position_count: usize) -> Vec<f64> {
    let spring_cols = position_count.max(1);
    let remaining = CHECKLIST_TOTAL_WIDTH_MM - ACTIVITY_COL_WIDTH_MM - REMARKS_COL_WIDTH_MM;
    let spring_w = remaining / spring_cols as f64;

    let mut widths = Vec::with_capacity(position_count + 2);
    widths.push(ACTIVITY_COL_WIDTH_MM);
    widths.extend(std::iter::repeat(spring_w).take(position_count));
    widths.push(REMARKS_COL_WIDTH_MM);
    widths
}

// ==========================================
// 文本净化与折行
// ==========================================

/// 净化进入文档的自由文本
///
/// 内置 Helvetica 按 WinAnsi 编码,仅保留可表示字符:
/// 可打印 ASCII + Latin-1 补充区,其余替换为 '?'。
/// 换行保留,由折行逻辑展开;回车与制表符折算为空白。
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| match c {
            '\n' => '\n',
            '\t' => ' ',
            c if c == ' ' || c.is_ascii_graphic() => c,
            c if ('\u{a0}'..='\u{ff}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// 估算单行文本宽度 (mm)
pub fn text_width_mm(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * char_width_mm(font_size)
}

fn char_width_mm(font_size: f64) -> f64 {
    font_size * AVG_CHAR_WIDTH_EM * PT_TO_MM
}

/// 行高 (mm): 字号的 1.25 倍行距
pub fn line_height_mm(font_size: f64) -> f64 {
    font_size * 1.25 * PT_TO_MM
}

/// 贪心折行: 先按显式换行拆分,再按估算宽度逐词填充
///
/// 超过整行宽度的长词按字符硬拆。空文本返回单个空行,
/// 保证表格行高至少一行。
pub fn wrap_text(text: &str, width_mm: f64, font_size: f64) -> Vec<String> {
    let max_chars = (width_mm / char_width_mm(font_size)).floor().max(1.0) as usize;
    let mut lines = Vec::new();

    for raw_line in sanitize(text).split('\n') {
        let line = raw_line.trim_end();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if candidate_len <= max_chars {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // 长词硬拆
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > max_chars {
                let chunk: String = rest.drain(..max_chars).collect();
                lines.push(chunk);
            }
            current = rest.into_iter().collect();
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
