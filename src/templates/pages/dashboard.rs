use crate::domain::apartment::Apartment;
use crate::domain::summary::{Filter, Summary};
use crate::templates::{bar_chart, card, desktop_layout, metric};
use maud::{html, Markup};

/// Rows shown in the table; the export carries all of them.
const TABLE_ROWS: usize = 500;

pub struct DashboardVm<'a> {
    pub source: String,
    pub districts: Vec<String>,
    pub filter: Filter,
    pub summary: Summary,
    pub rows: Vec<&'a Apartment>,
    pub export_href: String,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let m = &vm.summary.metrics;

    desktop_layout(
        "아파트 상세 데이터 분석 대시보드",
        html! {
            main {
                aside { (filter_form(vm)) }

                div {
                    p { code { (vm.source) } " 데이터를 기반으로 한 종합 시각화 리포트입니다." }

                    div class="metrics" {
                        (metric("총 아파트 수", &format!("{} 개", m.count)))
                        (metric("평균 세대수", &format!("{} 세대", m.mean_households)))
                        (metric("평균 최고 층수", &format!("{} 층", m.mean_top_floor)))
                        (metric("최다 건설사", m.top_builder.as_deref().unwrap_or("N/A")))
                    }

                    div class="charts" {
                        (card("아파트 유형 분포", bar_chart(&vm.summary.by_type)))
                        (card("연도별 준공 현황", bar_chart(&vm.summary.by_year)))
                        (card("난방 방식 분포", bar_chart(&vm.summary.by_heating)))
                        (card("최고 층수 분포", bar_chart(&vm.summary.floor_histogram)))
                    }

                    div style="margin-top: 16px;" {
                        (card("주요 건설사별 아파트 수 (Top 20)", bar_chart(&vm.summary.top_builders)))
                    }

                    div style="margin-top: 16px;" {
                        (card("원본 데이터", data_table(vm)))
                    }
                }
            }
        },
    )
}

fn filter_form(vm: &DashboardVm) -> Markup {
    html! {
        form method="get" action="/" {
            fieldset {
                legend { "행정구역 (구)" }
                @for d in &vm.districts {
                    label style="display: block;" {
                        input type="checkbox" name="district" value=(d)
                            checked[vm.filter.districts.contains(d)];
                        " " (d)
                    }
                }
            }
            fieldset {
                legend { "준공 연도 범위" }
                input type="number" name="year_from" value=(vm.filter.year_from) style="width: 80px;";
                " ~ "
                input type="number" name="year_to" value=(vm.filter.year_to) style="width: 80px;";
            }
            button type="submit" { "적용" }
        }
        p { a href=(vm.export_href) { "Excel로 내려받기" } }
    }
}

fn data_table(vm: &DashboardVm) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "단지명" }
                    th { "주소" }
                    th { "단지분류" }
                    th { "준공연도" }
                    th { "세대수" }
                    th { "시공사" }
                }
            }
            tbody {
                @for apt in vm.rows.iter().take(TABLE_ROWS) {
                    tr {
                        td { (apt.name) }
                        td { (apt.address) }
                        td { (apt.apt_type) }
                        td {
                            @if let Some(y) = apt.built_year { (y) }
                        }
                        td { (apt.households) }
                        td { (apt.builder) }
                    }
                }
            }
        }
        @if vm.rows.len() > TABLE_ROWS {
            p { (vm.rows.len() - TABLE_ROWS) " more rows in the export." }
        }
    }
}
