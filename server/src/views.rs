//! Server-rendered employee list.

use std::fmt::Write;

use platform_db::{Employee, PageInfo};

pub fn render_employee_page(page: &PageInfo<Employee>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Employees</title>\n</head>\n<body>\n<h1>Employees</h1>\n",
    );
    html.push_str(
        "<table class=\"emps\">\n<thead><tr><th>#</th><th>empName</th><th>gender</th>\
         <th>email</th><th>deptName</th></tr></thead>\n<tbody>\n",
    );
    for emp in &page.list {
        let record = &emp.record;
        let dept_name = emp
            .department
            .as_ref()
            .map(|dept| dept.dept_name.as_str())
            .unwrap_or("");
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.emp_id,
            escape(&record.emp_name),
            record.gender.code(),
            escape(&record.email),
            escape(dept_name),
        );
    }
    html.push_str("</tbody>\n</table>\n");
    let _ = writeln!(
        html,
        "<p class=\"summary\">Page {} of {}, {} records</p>",
        page.page_num, page.pages, page.total
    );
    render_pager(&mut html, page);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_pager(html: &mut String, page: &PageInfo<Employee>) {
    html.push_str("<nav class=\"pager\"><ul>\n");
    if page.has_previous_page {
        html.push_str("<li><a href=\"/list?pn=1\">first</a></li>\n");
        let _ = writeln!(
            html,
            "<li><a href=\"/list?pn={}\">&laquo;</a></li>",
            page.pre_page
        );
    }
    for num in &page.navigatepage_nums {
        if *num == page.page_num {
            let _ = writeln!(html, "<li class=\"active\">{num}</li>");
        } else {
            let _ = writeln!(html, "<li><a href=\"/list?pn={num}\">{num}</a></li>");
        }
    }
    if page.has_next_page {
        let _ = writeln!(
            html,
            "<li><a href=\"/list?pn={}\">&raquo;</a></li>",
            page.next_page
        );
        let _ = writeln!(
            html,
            "<li><a href=\"/list?pn={}\">last</a></li>",
            page.pages
        );
    }
    html.push_str("</ul></nav>\n");
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::{
        department,
        employee::{self, Gender},
    };
    use platform_db::PageRequest;

    fn emp(id: i32, name: &str) -> Employee {
        Employee {
            record: employee::Model {
                emp_id: id,
                emp_name: name.to_string(),
                gender: Gender::Female,
                email: format!("{name}@example.com"),
                d_id: Some(1),
            },
            department: Some(department::Model {
                dept_id: 1,
                dept_name: "R&D".into(),
            }),
        }
    }

    #[test]
    fn renders_rows_and_pager() {
        let page = PageInfo::new(PageRequest::new(2, 1), 3, vec![emp(2, "<script>")]);
        let html = render_employee_page(&page);
        assert!(html.contains("<td>&lt;script&gt;</td>"));
        assert!(html.contains("<td>R&amp;D</td>"));
        assert!(html.contains("<li class=\"active\">2</li>"));
        assert!(html.contains("href=\"/list?pn=1\">&laquo;"));
        assert!(html.contains("href=\"/list?pn=3\">&raquo;"));
        assert!(html.contains("Page 2 of 3, 3 records"));
    }
}
