use criterion::{criterion_group, criterion_main, Criterion};
use holiday_engine::{extract_rules, parse_description, parse_rules};
use std::hint::black_box;

const SPRING_FESTIVAL: &str = "1月28日（农历除夕、周二）至2月4日（农历正月初七、周二）放假调休，共8天。\
                               1月26日（周日）、2月8日（周六）上班。";

const NOTICE: &str = "国务院办公厅关于2025年部分节假日安排的通知
一、元旦：1月1日（周三）放假1天，不调休。
二、春节：1月28日（农历除夕、周二）至2月4日（农历正月初七、周二）放假调休，共8天。1月26日（周日）、2月8日（周六）上班。
三、清明节：4月4日（周五）至6日（周日）放假，共3天。
四、劳动节：5月1日（周四）至5日（周一）放假调休，共5天。4月27日（周日）上班。
五、端午节：5月31日（周六）至6月2日（周一）放假，共3天。
六、国庆节、中秋节：10月1日（周三）至8日（周三）放假调休，共8天。9月28日（周日）、10月11日（周六）上班。";

fn bench_description(c: &mut Criterion) {
    c.bench_function("parse_description/spring_festival", |b| {
        b.iter(|| parse_description(black_box("春节"), black_box(SPRING_FESTIVAL), 2025))
    });
}

fn bench_notice(c: &mut Criterion) {
    c.bench_function("parse_rules/notice_2025", |b| {
        b.iter(|| {
            let rules = extract_rules(black_box(NOTICE)).unwrap();
            parse_rules(&rules, 2025)
        })
    });
}

criterion_group!(benches, bench_description, bench_notice);
criterion_main!(benches);
