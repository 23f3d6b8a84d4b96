// ==========================================
// 客车弹簧故障管理系统 - 检修报告 PDF 渲染器
// ==========================================
// 职责: 把组装完成的 InspectionReport 渲染为分页 PDF 字节
// 版面: A4 横向,固定章节顺序:
//   标题 → 车辆标识块 → 弹簧配置表 → 缺陷汇总 →
//   4 份检查清单表 → 签名块
// 红线: 输出要么是完整文档要么是错误,不存在部分写出;
//       签名图片嵌入失败只丢弃图片槽,不中断组装
// ==========================================

use crate::domain::defect::{DefectCodeIndex, DefectRecord};
use crate::domain::inspection::InspectionRow;
use crate::domain::report::{InspectionReport, SignatureImages};
use crate::domain::spring::SpringConfiguration;
use crate::domain::types::SignatureRole;
use crate::report::error::{RenderError, RenderResult};
use crate::report::layout::{
    self, checklist_column_widths, line_height_mm, text_width_mm, wrap_text, BODY_FONT_SIZE,
    CELL_PADDING_MM, CELL_V_PADDING_MM, COLOR_BLACK, COLOR_CONFIG_HEADER, COLOR_DEFECT_HEADER,
    COLOR_GRID, COLOR_INFO_BG, COLOR_MUSTDO_HEADER, COLOR_VISUAL_HEADER, COLOR_WHITE,
    HEADING_FONT_SIZE, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PT_TO_MM,
    SIGNATURE_FONT_SIZE, SIGNATURE_IMAGE_HEIGHT_MM, SIGNATURE_IMAGE_WIDTH_MM, TITLE_FONT_SIZE,
};
use printpdf::path::PaintMode;
use printpdf::{
    image_crate, BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use tracing::instrument;

/// 报告标题 (文档固定文案)
const REPORT_TITLE: &str = "SPRING INSPECTION REPORT";

/// 姓名/日期缺失时的横线占位
const BLANK_PLACEHOLDER: &str = "__________________";

/// 无缺陷时的提示文案
const NO_DEFECTS_NOTICE: &str = "No defects reported.";

/// 签名块列宽 (mm)
const SIGNATURE_COL_WIDTHS: [f64; 4] = [50.0, 70.0, 50.0, 70.0];

/// 车辆标识块列宽 (mm)
const COACH_INFO_COL_WIDTHS: [f64; 4] = [30.0, 70.0, 30.0, 70.0];

/// 缺陷汇总表列宽 (mm)
const DEFECT_COL_WIDTHS: [f64; 5] = [25.0, 50.0, 25.0, 60.0, 40.0];

/// 弹簧配置表列宽 (mm)
const CONFIG_COL_WIDTHS: [f64; 2] = [110.0, 30.0];

#[derive(Clone, Copy)]
enum FontKind {
    Regular,
    Bold,
    Oblique,
}

// ==========================================
// ReportRenderer - 检修报告渲染器
// ==========================================
pub struct ReportRenderer {}

impl ReportRenderer {
    /// 创建新的报告渲染器
    pub fn new() -> Self {
        Self {}
    }

    /// 渲染完整报告,返回内存中的 PDF 字节
    #[instrument(skip_all, fields(coach = %report.coach_number, defects = report.total_defects()))]
    pub fn render(
        &self,
        report: &InspectionReport,
        index: &DefectCodeIndex,
        images: &SignatureImages,
    ) -> RenderResult<Vec<u8>> {
        let mut canvas = Canvas::new(REPORT_TITLE)?;

        self.render_title(&mut canvas);
        self.render_coach_info(&mut canvas, report);
        self.render_spring_configuration(&mut canvas, &report.spring_counts);
        self.render_defects_summary(&mut canvas, report, index);
        self.render_checklists(&mut canvas, report);
        self.render_signatures(&mut canvas, report, images);

        canvas.finish()
    }

    fn render_title(&self, canvas: &mut Canvas) {
        canvas.centered_text(REPORT_TITLE, FontKind::Bold, TITLE_FONT_SIZE);
        canvas.spacer(2.0);
    }

    /// 车辆标识块: 4 列标签/值网格
    fn render_coach_info(&self, canvas: &mut Canvas, report: &InspectionReport) {
        let rows: Vec<Vec<String>> = vec![
            vec![
                "Coach Number:".to_string(),
                report.coach_number.clone(),
                "Coach Code:".to_string(),
                report.coach_code.clone(),
            ],
            vec![
                "Coach Type:".to_string(),
                report.coach_type.clone(),
                "Secondary Type:".to_string(),
                report.secondary_type.clone(),
            ],
            vec![
                "Bogie 1 No.:".to_string(),
                report.bogie1_number.clone(),
                "Bogie 2 No.:".to_string(),
                report.bogie2_number.clone(),
            ],
            vec![
                "Date of Receipt:".to_string(),
                report.receipt_date_display().to_string(),
                "Inspector:".to_string(),
                report.inspector_name.clone(),
            ],
        ];

        for row in &rows {
            let h = canvas.measure_row(row, &COACH_INFO_COL_WIDTHS, BODY_FONT_SIZE);
            canvas.ensure_space(h);
            canvas.draw_row(
                row,
                &COACH_INFO_COL_WIDTHS,
                BODY_FONT_SIZE,
                Some(COLOR_INFO_BG),
                COLOR_BLACK,
                true,
            );
        }
        canvas.spacer(3.0);
    }

    /// 弹簧配置表 (配置为空时整节省略)
    fn render_spring_configuration(&self, canvas: &mut Canvas, config: &SpringConfiguration) {
        if config.is_empty() {
            return;
        }

        canvas.heading("Spring Configuration");
        let rows: Vec<Vec<String>> = config
            .iter()
            .map(|entry| {
                vec![
                    entry.spring_type.clone(),
                    format!("{} per bogie", entry.per_bogie),
                ]
            })
            .collect();
        canvas.draw_table(
            &CONFIG_COL_WIDTHS,
            &["Spring Type".to_string(), "Qty / Bogie".to_string()],
            &rows,
            COLOR_CONFIG_HEADER,
            BODY_FONT_SIZE,
        );
        canvas.spacer(3.0);
    }

    /// 缺陷汇总: 计数行 + 合并表 (转向架 1 在前) 或无缺陷提示
    fn render_defects_summary(
        &self,
        canvas: &mut Canvas,
        report: &InspectionReport,
        index: &DefectCodeIndex,
    ) {
        canvas.heading("Defects Summary");
        canvas.paragraph(
            &format!(
                "Bogie1: {}    Bogie2: {}    Total: {}",
                report.bogie1_defects.len(),
                report.bogie2_defects.len(),
                report.total_defects()
            ),
            FontKind::Regular,
            BODY_FONT_SIZE,
        );
        canvas.spacer(2.0);

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(report.total_defects());
        rows.extend(defect_rows(
            &report.bogie1_defects,
            &report.bogie1_number,
            index,
        ));
        rows.extend(defect_rows(
            &report.bogie2_defects,
            &report.bogie2_number,
            index,
        ));

        if rows.is_empty() {
            canvas.paragraph(NO_DEFECTS_NOTICE, FontKind::Oblique, BODY_FONT_SIZE);
        } else {
            canvas.draw_table(
                &DEFECT_COL_WIDTHS,
                &[
                    "Bogie".to_string(),
                    "Spring Type".to_string(),
                    "Spring No.".to_string(),
                    "Defect Type".to_string(),
                    "Location".to_string(),
                ],
                &rows,
                COLOR_DEFECT_HEADER,
                BODY_FONT_SIZE,
            );
        }
        canvas.spacer(4.0);
    }

    /// 4 份检查清单表,固定顺序
    fn render_checklists(&self, canvas: &mut Canvas, report: &InspectionReport) {
        let sections: [(&str, &[InspectionRow], (f64, f64, f64)); 4] = [
            (
                "Visual Inspection - Bogie 1",
                &report.bogie1_inspections,
                COLOR_VISUAL_HEADER,
            ),
            (
                "Visual Inspection - Bogie 2",
                &report.bogie2_inspections,
                COLOR_VISUAL_HEADER,
            ),
            (
                "Must Do - Bogie 1",
                &report.bogie1_must_do,
                COLOR_MUSTDO_HEADER,
            ),
            (
                "Must Do - Bogie 2",
                &report.bogie2_must_do,
                COLOR_MUSTDO_HEADER,
            ),
        ];

        for (title, rows, header_color) in sections {
            self.render_checklist_table(canvas, title, rows, &report.spring_counts, header_color);
        }
    }

    /// 单份检查清单表: Activity + 每部位一列 (配置顺序) + Remarks
    fn render_checklist_table(
        &self,
        canvas: &mut Canvas,
        title: &str,
        rows: &[InspectionRow],
        config: &SpringConfiguration,
        header_color: (f64, f64, f64),
    ) {
        canvas.heading(title);

        let widths = checklist_column_widths(config.len());

        let mut header: Vec<String> = Vec::with_capacity(config.len() + 2);
        header.push("Activity".to_string());
        header.extend(config.position_names().iter().map(|n| n.to_string()));
        header.push("Remarks".to_string());

        let keys = config.position_keys();
        let table_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(keys.len() + 2);
                cells.push(row.activity_text.clone());
                cells.extend(keys.iter().map(|key| row.answer_for(key).to_string()));
                cells.push(row.remarks.clone());
                cells
            })
            .collect();

        canvas.draw_table(&widths, &header, &table_rows, header_color, BODY_FONT_SIZE);
        canvas.spacer(3.0);
    }

    /// 签名块: 两个角色并排;任一角色有图片时渲染图片行
    fn render_signatures(
        &self,
        canvas: &mut Canvas,
        report: &InspectionReport,
        images: &SignatureImages,
    ) {
        canvas.spacer(4.0);
        canvas.heading("Signatures");

        let name_or_blank = |name: &Option<String>| -> String {
            name.clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| BLANK_PLACEHOLDER.to_string())
        };

        let rows: Vec<Vec<String>> = vec![
            vec![
                SignatureRole::SpringShop.heading().to_string(),
                String::new(),
                SignatureRole::Inspection.heading().to_string(),
                String::new(),
            ],
            vec![
                "Name & Signature:".to_string(),
                name_or_blank(&report.sig_shop.name),
                "Name & Signature:".to_string(),
                name_or_blank(&report.sig_inspection.name),
            ],
            vec![
                "Date:".to_string(),
                name_or_blank(&report.sig_shop.date),
                "Date:".to_string(),
                name_or_blank(&report.sig_inspection.date),
            ],
        ];

        for row in &rows {
            let h = canvas.measure_row(row, &SIGNATURE_COL_WIDTHS, SIGNATURE_FONT_SIZE);
            canvas.ensure_space(h);
            canvas.draw_row(
                row,
                &SIGNATURE_COL_WIDTHS,
                SIGNATURE_FONT_SIZE,
                None,
                COLOR_BLACK,
                false,
            );
        }

        if !images.is_empty() {
            canvas.spacer(2.0);
            canvas.ensure_space(SIGNATURE_IMAGE_HEIGHT_MM + 2.0);
            // 图片槽对齐签名块第 0 / 第 2 列
            let shop_x = MARGIN_MM;
            let inspection_x = MARGIN_MM + SIGNATURE_COL_WIDTHS[0] + SIGNATURE_COL_WIDTHS[1];
            place_signature_image(canvas, images.spring_shop.as_deref(), shop_x);
            place_signature_image(canvas, images.inspection.as_deref(), inspection_x);
            canvas.advance(SIGNATURE_IMAGE_HEIGHT_MM + 2.0);
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 缺陷记录 → 汇总表行 (转向架标签 + 显示名换算)
fn defect_rows(
    defects: &[DefectRecord],
    bogie_label: &str,
    index: &DefectCodeIndex,
) -> Vec<Vec<String>> {
    defects
        .iter()
        .map(|d| {
            vec![
                bogie_label.to_string(),
                d.spring_type.clone(),
                d.spring_number.clone(),
                index.display_for(&d.defect_code),
                d.location.clone(),
            ]
        })
        .collect()
}

/// 解码并放置一张签名图片;失败只记日志并跳过该槽
fn place_signature_image(canvas: &Canvas, bytes: Option<&[u8]>, x: f64) {
    let Some(bytes) = bytes else {
        return;
    };

    let decoded = match image_crate::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(error = %e, "签名图片解码失败,跳过该图片槽");
            return;
        }
    };

    // 统一转 RGB,规避带 alpha 通道的嵌入问题
    let rgb = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let image = Image::from_dynamic_image(&rgb);

    let px_w = image.image.width.0 as f64;
    let px_h = image.image.height.0 as f64;
    if px_w <= 0.0 || px_h <= 0.0 {
        tracing::warn!("签名图片尺寸为零,跳过该图片槽");
        return;
    }

    let dpi = 300.0;
    let native_w_mm = px_w * 25.4 / dpi;
    let native_h_mm = px_h * 25.4 / dpi;

    let transform = ImageTransform {
        translate_x: Some(Mm(x as f32)),
        translate_y: Some(Mm((canvas.y - SIGNATURE_IMAGE_HEIGHT_MM) as f32)),
        scale_x: Some((SIGNATURE_IMAGE_WIDTH_MM / native_w_mm) as f32),
        scale_y: Some((SIGNATURE_IMAGE_HEIGHT_MM / native_h_mm) as f32),
        dpi: Some(dpi as f32),
        ..Default::default()
    };

    image.add_to_layer(canvas.layer.clone(), transform);
}

// ==========================================
// Canvas - 页面游标与绘制原语
// ==========================================
// y 游标为当前可用区顶端 (自页底起算的 mm)。
// 空间不足时开新页;表格跨页时重绘表头行。
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    y: f64,
}

impl Canvas {
    fn new(title: &str) -> RenderResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let oblique = doc.add_builtin_font(BuiltinFont::HelveticaOblique)?;
        let layer_ref = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer: layer_ref,
            regular,
            bold,
            oblique,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn finish(self) -> RenderResult<Vec<u8>> {
        let bytes = self.doc.save_to_bytes()?;
        if bytes.is_empty() {
            return Err(RenderError::Internal("生成的 PDF 为空".to_string()));
        }
        Ok(bytes)
    }

    fn font(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
            FontKind::Oblique => &self.oblique,
        }
    }

    fn content_width(&self) -> f64 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM
    }

    fn fits(&self, height: f64) -> bool {
        self.y - height >= MARGIN_MM
    }

    fn ensure_space(&mut self, height: f64) {
        if !self.fits(height) {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn spacer(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn advance(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn set_fill(&self, color: (f64, f64, f64)) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(
                color.0 as f32,
                color.1 as f32,
                color.2 as f32,
                None,
            )));
    }

    fn set_outline(&self, color: (f64, f64, f64), thickness_pt: f64) {
        self.layer.set_outline_color(Color::Rgb(Rgb::new(
            color.0 as f32,
            color.1 as f32,
            color.2 as f32,
            None,
        )));
        self.layer.set_outline_thickness(thickness_pt as f32);
    }

    /// 居中单行文本 (标题用)
    fn centered_text(&mut self, text: &str, font: FontKind, size: f64) {
        let lh = line_height_mm(size);
        self.ensure_space(lh + 2.0);
        let width = text_width_mm(text, size);
        let x = (PAGE_WIDTH_MM - width) / 2.0;
        let baseline = self.y - 0.8 * size * PT_TO_MM;
        self.set_fill(COLOR_BLACK);
        self.layer
            .use_text(layout::sanitize(text), size as f32, Mm(x as f32), Mm(baseline as f32), self.font(font));
        self.y -= lh + 1.0;
    }

    /// 小节标题 (加粗 11pt)
    fn heading(&mut self, text: &str) {
        let lh = line_height_mm(HEADING_FONT_SIZE);
        self.ensure_space(lh + 8.0);
        let baseline = self.y - 0.8 * HEADING_FONT_SIZE * PT_TO_MM;
        self.set_fill(COLOR_BLACK);
        self.layer.use_text(
            layout::sanitize(text),
            HEADING_FONT_SIZE as f32,
            Mm(MARGIN_MM as f32),
            Mm(baseline as f32),
            &self.bold,
        );
        self.y -= lh + 1.5;
    }

    /// 左对齐段落 (自动折行与分页)
    fn paragraph(&mut self, text: &str, font: FontKind, size: f64) {
        let lh = line_height_mm(size);
        for line in wrap_text(text, self.content_width(), size) {
            self.ensure_space(lh + 1.0);
            let baseline = self.y - 0.8 * size * PT_TO_MM;
            self.set_fill(COLOR_BLACK);
            self.layer
                .use_text(line, size as f32, Mm(MARGIN_MM as f32), Mm(baseline as f32), self.font(font));
            self.y -= lh;
        }
    }

    /// 行高测量: 所有单元格折行后的最大行数决定高度
    fn measure_row(&self, cells: &[String], widths: &[f64], font_size: f64) -> f64 {
        let lh = line_height_mm(font_size);
        let max_lines = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| wrap_text(cell, w - 2.0 * CELL_PADDING_MM, font_size).len())
            .max()
            .unwrap_or(1);
        max_lines as f64 * lh + 2.0 * CELL_V_PADDING_MM
    }

    /// 绘制一行单元格 (可选背景/网格),返回后游标下移一行高
    ///
    /// 前置条件: 调用方已 ensure_space。
    fn draw_row(
        &mut self,
        cells: &[String],
        widths: &[f64],
        font_size: f64,
        bg: Option<(f64, f64, f64)>,
        text_color: (f64, f64, f64),
        grid: bool,
    ) {
        let h = self.measure_row(cells, widths, font_size);
        let lh = line_height_mm(font_size);
        let total_w: f64 = widths.iter().sum();
        let y_top = self.y;
        let y_bottom = y_top - h;

        if let Some(bg_color) = bg {
            self.set_fill(bg_color);
            let rect = Rect::new(
                Mm(MARGIN_MM as f32),
                Mm(y_bottom as f32),
                Mm((MARGIN_MM + total_w) as f32),
                Mm(y_top as f32),
            )
            .with_mode(PaintMode::Fill);
            self.layer.add_rect(rect);
        }

        if grid {
            self.set_outline(COLOR_GRID, 0.3);
            self.hline(MARGIN_MM, MARGIN_MM + total_w, y_top);
            self.hline(MARGIN_MM, MARGIN_MM + total_w, y_bottom);
            let mut x = MARGIN_MM;
            self.vline(x, y_top, y_bottom);
            for w in widths {
                x += w;
                self.vline(x, y_top, y_bottom);
            }
        }

        self.set_fill(text_color);
        let mut x = MARGIN_MM;
        for (cell, w) in cells.iter().zip(widths.iter()) {
            let lines = wrap_text(cell, w - 2.0 * CELL_PADDING_MM, font_size);
            for (i, line) in lines.iter().enumerate() {
                let baseline =
                    y_top - CELL_V_PADDING_MM - 0.8 * font_size * PT_TO_MM - i as f64 * lh;
                self.layer.use_text(
                    line.clone(),
                    font_size as f32,
                    Mm((x + CELL_PADDING_MM) as f32),
                    Mm(baseline as f32),
                    &self.regular,
                );
            }
            x += w;
        }
        self.set_fill(COLOR_BLACK);

        self.y = y_bottom;
    }

    /// 绘制带表头的表格;数据行跨页时在新页重绘表头
    fn draw_table(
        &mut self,
        widths: &[f64],
        header: &[String],
        rows: &[Vec<String>],
        header_color: (f64, f64, f64),
        font_size: f64,
    ) {
        let header_h = self.measure_row(header, widths, font_size);
        self.ensure_space(header_h + line_height_mm(font_size) + 2.0 * CELL_V_PADDING_MM);
        self.draw_row(header, widths, font_size, Some(header_color), COLOR_WHITE, true);

        for row in rows {
            let h = self.measure_row(row, widths, font_size);
            if !self.fits(h) {
                self.new_page();
                self.draw_row(header, widths, font_size, Some(header_color), COLOR_WHITE, true);
            }
            self.draw_row(row, widths, font_size, None, COLOR_BLACK, true);
        }
    }

    fn hline(&self, x1: f64, x2: f64, y: f64) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x1 as f32), Mm(y as f32)), false),
                (Point::new(Mm(x2 as f32), Mm(y as f32)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn vline(&self, x: f64, y1: f64, y2: f64) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x as f32), Mm(y1 as f32)), false),
                (Point::new(Mm(x as f32), Mm(y2 as f32)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }
}
