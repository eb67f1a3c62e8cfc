//! Generators for synthetic file server pages.

/// Builds an Apache-style "Index of" page listing `files` in the given order.
///
/// The page also carries the parent link, a sort-header link and a non-data
/// file, which the listing code must skip.
///
/// # Example
///
/// ```
/// use test_utils::directory_index_html;
///
/// let html = directory_index_html(&["a.csv", "b.csv"]);
/// assert!(html.contains(r#"<a href="a.csv">a.csv</a>"#));
/// assert!(html.find("a.csv").unwrap() < html.find("b.csv").unwrap());
/// ```
pub fn directory_index_html(files: &[&str]) -> String {
    let mut rows = String::new();
    for (i, file) in files.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td><a href=\"{file}\">{file}</a></td><td align=\"right\">2024-03-{:02} 12:00</td><td align=\"right\">1.2M</td></tr>\n",
            (i % 28) + 1
        ));
    }

    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 3.2 Final//EN">
<html>
 <head>
  <title>Index of /queimadas/queimadas/focos/csv</title>
 </head>
 <body>
<h1>Index of /queimadas/queimadas/focos/csv</h1>
  <table>
   <tr><th><a href="?C=N;O=D">Name</a></th><th><a href="?C=M;O=A">Last modified</a></th><th><a href="?C=S;O=A">Size</a></th></tr>
   <tr><td><a href="../">Parent Directory</a></td><td>&nbsp;</td><td align="right">  - </td></tr>
{rows}   <tr><td><a href="LEIAME.txt">LEIAME.txt</a></td><td align="right">2020-01-01 00:00</td><td align="right">2.1K</td></tr>
  </table>
</body></html>
"#
    )
}

/// Builds a small CSV body shaped like an INPE hotspot file.
pub fn hotspot_csv(rows: usize) -> String {
    let mut csv = String::from("id,lat,lon,data_hora_gmt,satelite,municipio,estado,pais\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "{},-{}.{:03},-{}.{:03},2024-03-15 12:{:02}:00,AQUA_M-T,PORTO VELHO,RONDONIA,Brasil\n",
            i,
            8 + i % 3,
            i * 7 % 1000,
            63 + i % 2,
            i * 13 % 1000,
            i % 60
        ));
    }
    csv
}
