// reply formatting - the channel feeds an html-capable chat widget,
// hence the <br> line breaks

use super::db::Product;

const NO_RESULTS: &str = "No Products Found";

pub fn product_listing(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut reply = String::from("🛒 Showing all related results - <br><br>");
    for product in products {
        reply.push_str(&format!("{} - ₹{}<br>", product.name, product.price));
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product {
            id: 1,
            category: "Electronics".to_string(),
            description: "test".to_string(),
            image_url: None,
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn empty_listing_is_the_fixed_message() {
        assert_eq!(product_listing(&[]), "No Products Found");
    }

    #[test]
    fn one_line_per_product_with_name_and_price() {
        let products = vec![product("Pixel 8", 49999.0), product("Nord CE", 24999.0)];
        let reply = product_listing(&products);

        assert!(reply.starts_with("🛒 Showing all related results - <br><br>"));
        assert_eq!(reply.matches("<br>").count(), 4);
        assert!(reply.contains("Pixel 8 - ₹49999"));
        assert!(reply.contains("Nord CE - ₹24999"));
    }
}
