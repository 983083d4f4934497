use chrono::{Datelike, Duration, NaiveDate, Weekday};
use image::{ImageBuffer, Rgba, RgbaImage};

use crate::config::Config;
use crate::holidays::HolidayTable;
use crate::text_renderer::TextRenderer;

/// Renders the one-week calendarium strip at the bottom of a page: month and
/// year on the left, seven day columns with weekday abbreviation and day
/// number, Sundays and holidays highlighted, labels beneath the days.
pub struct CalendarRenderer<'a> {
    config: &'a Config,
    text: &'a TextRenderer,
    holidays: &'a HolidayTable,
}

impl<'a> CalendarRenderer<'a> {
    pub fn new(config: &'a Config, text: &'a TextRenderer, holidays: &'a HolidayTable) -> Self {
        CalendarRenderer {
            config,
            text,
            holidays,
        }
    }

    pub fn render_week(&self, week_start: NaiveDate, width: u32, height: u32) -> RgbaImage {
        let cfg = self.config;
        let mut strip = background(width, height, cfg.background_color);

        let large = cfg.font_size_large;
        let small = cfg.font_size_small;
        let margin = cfg.spacing as i32;
        let gap = (small * 0.4) as i32;
        let base_y = height as i32 - margin - large as i32 - small as i32;

        // Month header takes roughly four day columns on the left
        let header_cols = 4.0;
        let col_width = (width as f64 - 2.0 * margin as f64) / (7.0 + header_cols - 0.5);

        let first_day = week_start;
        let header = format!("{} {:02}", month_name(first_day), first_day.year() % 100);
        self.text.draw(
            &mut strip,
            &header,
            margin * 3,
            base_y,
            large,
            cfg.secondary_text_color,
        );

        for day_no in 0..7 {
            let date = week_start + Duration::days(day_no);
            let x_center = (margin as f64 * 3.0 + (day_no as f64 + header_cols) * col_width) as i32;

            let highlighted = date.weekday() == Weekday::Sun || self.holidays.is_holiday(date);
            let number_color = if highlighted {
                cfg.holiday_color
            } else {
                cfg.text_color
            };

            let name = day_name(date.weekday());
            self.draw_centered_at(&mut strip, name, x_center, base_y - small as i32 - gap, small, cfg.secondary_text_color);

            let number = date.day().to_string();
            self.draw_centered_at(&mut strip, &number, x_center, base_y, large, number_color);

            if let Some(label) = self.holidays.label(date) {
                let label_color = if self.holidays.is_holiday(date) {
                    cfg.holiday_color
                } else {
                    cfg.text_color
                };
                self.draw_centered_at(
                    &mut strip,
                    label,
                    x_center,
                    base_y + large as i32 + gap,
                    small,
                    label_color,
                );
            }
        }

        strip
    }

    /// Title strip for the first page, replacing the calendarium.
    pub fn render_title(&self, title: &str, width: u32, height: u32) -> RgbaImage {
        let cfg = self.config;
        let mut strip = background(width, height, cfg.background_color);
        let y = (height as i32 - cfg.font_size_large as i32) / 2;
        self.text
            .draw_centered(&mut strip, title, width, y, cfg.font_size_large, cfg.text_color);
        strip
    }

    fn draw_centered_at(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x_center: i32,
        y: i32,
        size: f32,
        color: [u8; 3],
    ) {
        let text_width = self.text.measure(text, size) as i32;
        self.text.draw(canvas, text, x_center - text_width / 2, y, size, color);
    }
}

fn background(width: u32, height: u32, color: [u8; 3]) -> RgbaImage {
    let [r, g, b] = color;
    ImageBuffer::from_pixel(width, height, Rgba([r, g, b, 255]))
}

fn month_name(date: NaiveDate) -> &'static str {
    match date.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_and_day_names() {
        assert_eq!(month_name(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), "January");
        assert_eq!(month_name(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()), "December");
        assert_eq!(day_name(Weekday::Mon), "Mon");
        assert_eq!(day_name(Weekday::Sun), "Sun");
    }
}
